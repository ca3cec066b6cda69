use dioxus::prelude::*;

use crate::domain::{Delta, Direction};

#[component]
pub fn KpiCard(title: String, value: String, description: Option<String>) -> Element {
    rsx! {
        div { class: "card",
            h3 { class: "muted", "{title}" }
            p { style: "font-size: 1.5rem; font-weight: 600; margin: 0.5rem 0;", "{value}" }
            if let Some(desc) = description {
                p { class: "muted", "{desc}" }
            }
        }
    }
}

/// Signed delta coloured by direction.
#[component]
pub fn DeltaLabel(delta: Delta) -> Element {
    let class = match delta.direction() {
        Some(Direction::MoreExpensive) => "delta-more",
        Some(Direction::LessExpensive) => "delta-less",
        Some(Direction::Same) => "delta-same",
        None => "delta-na",
    };
    rsx! {
        span { class: "{class}", "{delta}" }
    }
}
