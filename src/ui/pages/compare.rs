use dioxus::prelude::*;
use time::format_description::well_known::Rfc3339;
use tracing::warn;

use crate::{
    app::Route,
    domain::{compare, AppState, Category, CitySelection, ComparisonRecord},
    infra::pricing::PricingClient,
    ui::components::{
        comparison_chart::ComparisonChart,
        kpi_card::{DeltaLabel, KpiCard},
        toast::{push_toast, ToastKind, ToastMessage},
    },
    util::settings::PricingSettings,
};

#[component]
pub fn ComparePage(first: String, second: String) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let nav = use_navigator();
    let pricing = state.with(|st| st.settings.pricing.clone());

    let comparison = use_resource(use_reactive!(|first, second| {
        let pricing = pricing.clone();
        async move { run_comparison(pricing, first, second).await }
    }));

    use_effect(move || {
        if let Some(Err(message)) = &*comparison.read() {
            push_toast(toasts, ToastKind::Error, "Comparison failed", message.clone());
        }
    });

    let title = format!("{first} vs {second}");
    let swap_first = first.clone();
    let swap_second = second.clone();
    let on_swap = move |_| {
        let swapped = CitySelection::new(swap_first.clone(), swap_second.clone()).swapped();
        state.with_mut(|st| st.selection = swapped.clone());
        nav.push(Route::Compare {
            first: swapped.first,
            second: swapped.second,
        });
    };

    let body = match comparison.read().clone() {
        None => rsx! {
            div { class: "card muted", "Fetching cost of living data..." }
        },
        Some(Err(message)) => rsx! {
            div { class: "notice", "{message}" }
        },
        Some(Ok(record)) => rsx! { ComparisonView { record } },
    };

    rsx! {
        div { style: "display: flex; flex-direction: column; gap: 1.5rem;",
            header { style: "display: flex; align-items: center; gap: 1rem;",
                button {
                    class: "btn",
                    onclick: move |_| { nav.push(Route::Select {}); },
                    "← Back"
                }
                h1 { style: "margin: 0; font-size: 1.5rem;", "{title}" }
                button { class: "btn", onclick: on_swap, "Swap" }
            }
            {body}
        }
    }
}

async fn run_comparison(
    pricing: PricingSettings,
    first: String,
    second: String,
) -> Result<ComparisonRecord, String> {
    let client = PricingClient::new(&pricing).map_err(|err| {
        warn!(%err, "failed to initialise pricing client");
        format!("Failed to initialise pricing client: {err}")
    })?;
    compare(&client, &first, &second)
        .await
        .map_err(|err| err.to_string())
}

#[component]
fn ComparisonView(record: ComparisonRecord) -> Element {
    let summary = record.summary();
    let overall = record.overall_delta();
    let first_name = record.first.city_name.clone();
    let second_name = record.second.city_name.clone();
    let insights: Vec<(Category, String)> = Category::ALL
        .iter()
        .map(|category| (*category, record.insight(*category)))
        .collect();
    let deltas = record.deltas.clone();
    let generated = record
        .generated_at
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());
    let has_estimates = record.has_estimates();

    rsx! {
        if has_estimates {
            div { class: "notice",
                "Some values are estimates because live price data was unavailable. They are marked \"est.\" and may change on the next comparison."
            }
        }

        ComparisonChart { record: record.clone() }

        div { class: "grid-2",
            section { class: "card",
                h2 { "Summary" }
                p { "{summary}" }
                p { class: "muted", "Overall difference: " DeltaLabel { delta: overall } }
            }
            section { class: "card",
                h2 { "Key insights" }
                ul {
                    for (category, text) in insights {
                        li { key: "{category}", "{text}" }
                    }
                }
            }
        }

        div { class: "grid-3",
            for entry in deltas {
                KpiCard {
                    key: "{entry.category}",
                    title: entry.category.name().to_string(),
                    value: entry.delta.to_string(),
                    description: Some(format!(
                        "{first_name}: {} · {second_name}: {}",
                        entry.first.value(),
                        entry.second.value()
                    )),
                }
            }
        }

        p { class: "muted", "Generated {generated}" }
    }
}
