//! Thin asynchronous client for the cost-of-living pricing API.
//!
//! - Fetches the raw price list for a city.
//! - Never surfaces failures to callers of [`CostProvider`]; unreachable or
//!   malformed responses are replaced with estimated values.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, InvalidHeaderValue},
    Client, Url,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{
    estimate_city, evaluate_city, CostOfLivingData, CostProvider, FallbackSource, PriceItem,
    SeededSource, ThreadRngSource,
};
use crate::util::settings::PricingSettings;
use crate::util::version::user_agent;

pub const DEFAULT_BASE_URL: &str = "https://cost-of-living-and-prices.p.rapidapi.com/";
pub const DEFAULT_API_HOST: &str = "cost-of-living-and-prices.p.rapidapi.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum PricingClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct PricingClient {
    http: Client,
    base_url: Url,
    timeout: Duration,
    fallback: Arc<dyn FallbackSource>,
}

impl PricingClient {
    pub fn new(settings: &PricingSettings) -> Result<Self, PricingClientError> {
        let base_url = Url::parse(&with_trailing_slash(&settings.base_url))?;

        let mut headers = HeaderMap::new();
        if let Some(key) = settings.api_key.as_deref().filter(|key| !key.is_empty()) {
            headers.insert("X-RapidAPI-Key", HeaderValue::from_str(key)?);
            headers.insert("X-RapidAPI-Host", HeaderValue::from_str(&settings.api_host)?);
        }

        let http = Client::builder()
            .user_agent(user_agent())
            .default_headers(headers)
            .build()?;

        let fallback: Arc<dyn FallbackSource> = match settings.fallback_seed {
            Some(seed) => Arc::new(SeededSource::new(seed)),
            None => Arc::new(ThreadRngSource),
        };

        Ok(Self {
            http,
            base_url,
            timeout: Duration::from_secs(settings.timeout_secs),
            fallback,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackSource>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Raw price list for `city_name`. An absent `prices` field yields an
    /// empty list.
    pub async fn get_prices(&self, city_name: &str) -> Result<Vec<PriceItem>, PricingClientError> {
        let mut url = self.base_url.join("prices")?;
        url.query_pairs_mut().append_pair("city_name", city_name);

        debug!(%url, "requesting prices");

        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;
        let payload: PricesResponse = response.json().await?;

        Ok(payload
            .prices
            .unwrap_or_default()
            .into_iter()
            .map(PriceItem::from)
            .collect())
    }
}

#[async_trait]
impl CostProvider for PricingClient {
    async fn fetch_cost_of_living(&self, city_name: &str) -> CostOfLivingData {
        info!(city = city_name, "cost of living request started");
        let started = Instant::now();

        match self.get_prices(city_name).await {
            Ok(items) => {
                let data = evaluate_city(city_name, &items, self.fallback.as_ref());
                info!(
                    city = city_name,
                    items = items.len(),
                    estimated = data.has_estimates(),
                    latency_ms = started.elapsed().as_millis() as u64,
                    "cost of living request succeeded"
                );
                data
            }
            Err(error) => {
                warn!(
                    city = city_name,
                    %error,
                    latency_ms = started.elapsed().as_millis() as u64,
                    "cost of living request failed; using estimates"
                );
                estimate_city(city_name, self.fallback.as_ref())
            }
        }
    }
}

fn with_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    }
}

#[derive(Debug, Deserialize)]
struct PricesResponse {
    #[serde(default)]
    prices: Option<Vec<PriceRecordDto>>,
}

#[derive(Debug, Deserialize)]
struct PriceRecordDto {
    #[serde(default)]
    item_name: Option<String>,
    #[serde(default, alias = "avg", deserialize_with = "price_from_json")]
    avg_price: f64,
}

impl From<PriceRecordDto> for PriceItem {
    fn from(dto: PriceRecordDto) -> Self {
        Self {
            name: dto.item_name.unwrap_or_default(),
            price: dto.avg_price,
        }
    }
}

/// Accepts numbers, numeric strings and null. Anything unparseable becomes 0.
fn price_from_json<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct NumberOrString;

    impl<'de> serde::de::Visitor<'de> for NumberOrString {
        type Value = f64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number, a numeric string or null")
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(finite_or_zero(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value
                .trim()
                .parse::<f64>()
                .map(finite_or_zero)
                .unwrap_or(0.0))
        }

        fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(0.0)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(0.0)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(0.0)
        }
    }

    deserializer.deserialize_any(NumberOrString)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::domain::{compare, entities::FallbackRange, Category, CategoryValue};

    fn settings_for(base_url: &str) -> PricingSettings {
        PricingSettings {
            base_url: base_url.to_string(),
            api_key: Some("test-key".to_string()),
            ..PricingSettings::default()
        }
    }

    fn client_for(base_url: &str) -> PricingClient {
        PricingClient::new(&settings_for(base_url))
            .unwrap()
            .with_fallback(Arc::new(SeededSource::new(1)))
    }

    async fn mount_prices(server: &MockServer, city: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/prices"))
            .and(query_param("city_name", city))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    fn assert_primary_ranges(data: &CostOfLivingData) {
        assert!(data.is_fully_estimated());
        for category in Category::ALL {
            let value = data.get(category).value();
            assert!(
                category.fallback_range().contains(value),
                "{category} = {value}"
            );
        }
    }

    #[tokio::test]
    async fn seeded_clients_estimate_identically() {
        let settings = PricingSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            fallback_seed: Some(99),
            ..PricingSettings::default()
        };
        let first = PricingClient::new(&settings)
            .unwrap()
            .with_timeout(Duration::from_secs(1));
        let second = PricingClient::new(&settings)
            .unwrap()
            .with_timeout(Duration::from_secs(1));

        let a = first.fetch_cost_of_living("Minsk").await;
        let b = second.fetch_cost_of_living("Minsk").await;
        assert_eq!(a, b);
        assert_primary_ranges(&a);
    }

    #[test]
    fn price_records_accept_strings_numbers_and_null() {
        let payload: PricesResponse = serde_json::from_value(json!({
            "prices": [
                { "item_name": "Rent", "avg_price": "2000" },
                { "item_name": "Apartment", "avg_price": 1800.5 },
                { "item_name": "House", "avg_price": null },
                { "item_name": "Taxi", "avg_price": "n/a" },
                { "item_name": "Bus", "avg": 3 },
                { "avg_price": 7 }
            ]
        }))
        .unwrap();

        let items: Vec<PriceItem> = payload
            .prices
            .unwrap()
            .into_iter()
            .map(PriceItem::from)
            .collect();
        let prices: Vec<f64> = items.iter().map(|item| item.price).collect();
        assert_eq!(prices, vec![2000.0, 1800.5, 0.0, 0.0, 3.0, 7.0]);
        assert_eq!(items[5].name, "");
    }

    #[tokio::test]
    async fn averages_matching_items() {
        let server = MockServer::start().await;
        mount_prices(
            &server,
            "Paris",
            json!({
                "prices": [
                    { "item_name": "Rent", "avg_price": "2000" },
                    { "item_name": "Apartment", "avg_price": "1800" },
                    { "item_name": "Meal, Inexpensive Restaurant", "avg_price": 15 },
                    { "item_name": "Grocery basket", "avg_price": "60" },
                    { "item_name": "Taxi 1km", "avg_price": 2.1 },
                    { "item_name": "Monthly Bus Pass", "avg_price": 84 },
                    { "item_name": "Basic Utilities", "avg_price": "180" },
                    { "item_name": "Internet 60 Mbps", "avg_price": "30" }
                ]
            }),
        )
        .await;

        let data = client_for(&server.uri()).fetch_cost_of_living("Paris").await;

        assert_eq!(data.city_name, "Paris");
        assert_eq!(data.housing, CategoryValue::Measured(1900));
        assert_eq!(data.food, CategoryValue::Measured(38));
        assert_eq!(data.transport, CategoryValue::Measured(43));
        assert_eq!(data.utilities, CategoryValue::Measured(105));
    }

    #[tokio::test]
    async fn sends_provider_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/prices"))
            .and(header("X-RapidAPI-Key", "test-key"))
            .and(header("X-RapidAPI-Host", DEFAULT_API_HOST))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "prices": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let items = client_for(&server.uri()).get_prices("Tokyo").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn missing_categories_use_wide_range() {
        let server = MockServer::start().await;
        mount_prices(
            &server,
            "Sydney",
            json!({ "prices": [ { "item_name": "Rent", "avg_price": "2400" } ] }),
        )
        .await;

        let data = client_for(&server.uri()).fetch_cost_of_living("Sydney").await;

        assert_eq!(data.housing, CategoryValue::Measured(2400));
        for category in [Category::Food, Category::Transport, Category::Utilities] {
            let value = data.get(category);
            assert!(value.is_estimated());
            assert!(FallbackRange::UNMATCHED.contains(value.value()));
        }
    }

    #[tokio::test]
    async fn absent_price_list_is_empty() {
        let server = MockServer::start().await;
        mount_prices(&server, "Quito", json!({ "error": null })).await;

        let client = client_for(&server.uri());
        assert!(client.get_prices("Quito").await.unwrap().is_empty());

        let data = client.fetch_cost_of_living("Quito").await;
        assert!(data.is_fully_estimated());
        for category in Category::ALL {
            assert!(FallbackRange::UNMATCHED.contains(data.get(category).value()));
        }
    }

    #[tokio::test]
    async fn server_error_falls_back_to_primary_ranges() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        assert!(client.get_prices("Lagos").await.is_err());

        let data = client.fetch_cost_of_living("Lagos").await;
        assert_eq!(data.city_name, "Lagos");
        assert_primary_ranges(&data);
    }

    #[tokio::test]
    async fn malformed_payload_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let data = client_for(&server.uri()).fetch_cost_of_living("Lima").await;
        assert_primary_ranges(&data);
    }

    #[tokio::test]
    async fn slow_responses_time_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "prices": [ { "item_name": "Rent", "avg_price": 900 } ] }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri()).with_timeout(Duration::from_millis(200));
        let data = client.fetch_cost_of_living("Cairo").await;
        assert_primary_ranges(&data);
    }

    #[tokio::test]
    async fn one_failing_city_still_compares() {
        let server = MockServer::start().await;
        mount_prices(
            &server,
            "Madrid",
            json!({
                "prices": [
                    { "item_name": "Rent", "avg_price": "1100" },
                    { "item_name": "Meal", "avg_price": "14" },
                    { "item_name": "Bus", "avg_price": "2" },
                    { "item_name": "Internet", "avg_price": "35" }
                ]
            }),
        )
        .await;
        Mock::given(method("GET"))
            .and(query_param("city_name", "Atlantis"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let record = compare(&client, "Madrid", "Atlantis").await.unwrap();

        assert_eq!(record.first.housing, CategoryValue::Measured(1100));
        assert!(!record.first.has_estimates());
        assert_eq!(record.second.city_name, "Atlantis");
        assert_primary_ranges(&record.second);
        assert_eq!(record.deltas.len(), 4);
        assert!(record.has_estimates());
    }

    #[tokio::test]
    async fn unreachable_host_falls_back() {
        let client = client_for("http://127.0.0.1:9").with_timeout(Duration::from_secs(1));
        let data = client.fetch_cost_of_living("Reykjavik").await;
        assert_eq!(data.city_name, "Reykjavik");
        assert_primary_ranges(&data);
    }
}
