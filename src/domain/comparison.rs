//! Side-by-side comparison of two cities.
//!
//! - Fetches both cities concurrently through a [`CostProvider`].
//! - Derives signed percentage deltas per category, relative to the second city.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{info, Instrument};
use uuid::Uuid;

use super::entities::{Category, CategoryValue, CostOfLivingData};

/// Anything that can produce cost-of-living data for a city. Implementations
/// absorb their own failures; the returned record is always complete.
#[async_trait]
pub trait CostProvider: Send + Sync {
    async fn fetch_cost_of_living(&self, city_name: &str) -> CostOfLivingData;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("two cities are required for a comparison")]
    MissingCity,
}

/// Signed percentage difference of the first city against the second.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delta {
    Percent(i64),
    /// The second city reports zero while the first does not.
    Undefined,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    MoreExpensive,
    LessExpensive,
    Same,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::MoreExpensive => "more expensive than",
            Direction::LessExpensive => "less expensive than",
            Direction::Same => "same as",
        }
    }

    /// Comparative without the trailing "than", for "X is 10% more expensive in A than in B".
    pub fn comparative(&self) -> &'static str {
        match self {
            Direction::MoreExpensive => "more expensive",
            Direction::LessExpensive => "less expensive",
            Direction::Same => "the same",
        }
    }
}

impl Delta {
    pub fn between(first: f64, second: f64) -> Self {
        if first == second {
            return Delta::Percent(0);
        }
        if second == 0.0 {
            return Delta::Undefined;
        }
        Delta::Percent(((first - second) / second * 100.0).round() as i64)
    }

    pub fn percent(&self) -> Option<i64> {
        match self {
            Delta::Percent(value) => Some(*value),
            Delta::Undefined => None,
        }
    }

    pub fn magnitude(&self) -> Option<u64> {
        self.percent().map(i64::unsigned_abs)
    }

    pub fn direction(&self) -> Option<Direction> {
        self.percent().map(|value| match value {
            v if v > 0 => Direction::MoreExpensive,
            v if v < 0 => Direction::LessExpensive,
            _ => Direction::Same,
        })
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delta::Percent(value) if *value > 0 => write!(f, "+{value}%"),
            Delta::Percent(value) => write!(f, "{value}%"),
            Delta::Undefined => f.write_str("N/A"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryDelta {
    pub category: Category,
    pub first: CategoryValue,
    pub second: CategoryValue,
    pub delta: Delta,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonRecord {
    pub first: CostOfLivingData,
    pub second: CostOfLivingData,
    /// One entry per category, in [`Category::ALL`] order.
    pub deltas: [CategoryDelta; 4],
    pub generated_at: OffsetDateTime,
}

impl ComparisonRecord {
    pub fn new(first: CostOfLivingData, second: CostOfLivingData) -> Self {
        let deltas = Category::ALL.map(|category| {
            let a = first.get(category);
            let b = second.get(category);
            CategoryDelta {
                category,
                first: a,
                second: b,
                delta: Delta::between(a.value() as f64, b.value() as f64),
            }
        });

        Self {
            first,
            second,
            deltas,
            generated_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn delta(&self, category: Category) -> Delta {
        self.deltas
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.delta)
            .unwrap_or(Delta::Undefined)
    }

    /// Delta over the sum of all four categories.
    pub fn overall_delta(&self) -> Delta {
        Delta::between(self.first.total() as f64, self.second.total() as f64)
    }

    /// Category with the largest absolute delta; earlier categories win ties.
    pub fn biggest_difference(&self) -> Option<&CategoryDelta> {
        self.deltas
            .iter()
            .filter(|entry| entry.delta.magnitude().is_some())
            .fold(None, |best: Option<&CategoryDelta>, entry| match best {
                Some(current) if current.delta.magnitude() >= entry.delta.magnitude() => {
                    Some(current)
                }
                _ => Some(entry),
            })
    }

    pub fn has_estimates(&self) -> bool {
        self.first.has_estimates() || self.second.has_estimates()
    }

    pub fn insight(&self, category: Category) -> String {
        let first = &self.first.city_name;
        let second = &self.second.city_name;
        let delta = self.delta(category);
        match (delta.direction(), delta.magnitude()) {
            (Some(Direction::Same), _) => {
                format!("{category} costs about the same in {first} and {second}")
            }
            (Some(direction), Some(magnitude)) => format!(
                "{category} is {magnitude}% {} in {first} than in {second}",
                direction.comparative()
            ),
            _ => format!("{category} cannot be compared: no cost reported for {second}"),
        }
    }

    pub fn summary(&self) -> String {
        let first = &self.first.city_name;
        let second = &self.second.city_name;
        let overall = self.overall_delta();
        let mut text = match (overall.direction(), overall.magnitude()) {
            (Some(Direction::Same), _) => {
                format!("Overall, {first} and {second} cost about the same.")
            }
            (Some(direction), Some(magnitude)) => format!(
                "Overall, {first} is approximately {magnitude}% {} {second}.",
                direction.label()
            ),
            _ => format!("No overall comparison is possible for {second}."),
        };
        if let Some(biggest) = self.biggest_difference() {
            if biggest.delta != Delta::Percent(0) {
                text.push_str(&format!(
                    " The biggest difference is in {} costs.",
                    biggest.category.name().to_lowercase()
                ));
            }
        }
        text
    }
}

/// Fetches both cities concurrently and derives their deltas. Empty names
/// are rejected before any provider call is made.
pub async fn compare<P>(
    provider: &P,
    first_city: &str,
    second_city: &str,
) -> Result<ComparisonRecord, CompareError>
where
    P: CostProvider + ?Sized,
{
    let first_city = first_city.trim();
    let second_city = second_city.trim();
    if first_city.is_empty() || second_city.is_empty() {
        return Err(CompareError::MissingCity);
    }

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "compare",
        %request_id,
        first = first_city,
        second = second_city
    );

    async move {
        let (first, second) = tokio::join!(
            provider.fetch_cost_of_living(first_city),
            provider.fetch_cost_of_living(second_city)
        );
        let record = ComparisonRecord::new(first, second);
        info!(
            overall = %record.overall_delta(),
            estimated = record.has_estimates(),
            "comparison ready"
        );
        Ok(record)
    }
    .instrument(span)
    .await
}
