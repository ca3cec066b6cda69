use dioxus::prelude::*;

use crate::app::Route;
use crate::ui::components::kpi_card::KpiCard;

#[component]
pub fn HomePage() -> Element {
    let nav = use_navigator();

    rsx! {
        div {
            section { class: "hero",
                h1 { "City Cost Compare" }
                p { "Compare the cost of living between any two cities worldwide." }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| { nav.push(Route::Select {}); },
                    "Start comparing"
                }
            }
            div { class: "grid-3",
                KpiCard {
                    title: "Four categories".to_string(),
                    value: "Housing · Food · Transport · Utilities".to_string(),
                    description: Some("Averaged from live price listings for each city.".to_string()),
                }
                KpiCard {
                    title: "Side by side".to_string(),
                    value: "Bar chart + deltas".to_string(),
                    description: Some("Percentages are relative to the second city.".to_string()),
                }
                KpiCard {
                    title: "Always available".to_string(),
                    value: "Estimates when offline".to_string(),
                    description: Some("Missing data is filled with flagged estimates.".to_string()),
                }
            }
        }
    }
}
