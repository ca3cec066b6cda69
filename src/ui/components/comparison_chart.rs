use dioxus::prelude::*;

use crate::domain::{CategoryValue, ComparisonRecord};

#[derive(Clone, PartialEq)]
struct BarRow {
    label: &'static str,
    first: CategoryValue,
    second: CategoryValue,
    first_width: f64,
    second_width: f64,
}

/// Horizontal bar chart of every category, scaled to the largest value on
/// either side.
#[component]
pub fn ComparisonChart(record: ComparisonRecord) -> Element {
    let rows = bar_rows(&record);
    let first_name = record.first.city_name.clone();
    let second_name = record.second.city_name.clone();

    rsx! {
        section { class: "card",
            h3 { "Cost Comparison" }
            div { class: "legend",
                span { span { class: "legend-swatch bar-first" } "{first_name}" }
                span { span { class: "legend-swatch bar-second" } "{second_name}" }
            }
            for row in rows {
                div { class: "chart-row",
                    strong { "{row.label}" }
                    div { class: "chart-bars",
                        BarLine { value: row.first, width: row.first_width, bar_class: "bar bar-first" }
                        BarLine { value: row.second, width: row.second_width, bar_class: "bar bar-second" }
                    }
                }
            }
        }
    }
}

#[component]
fn BarLine(value: CategoryValue, width: f64, bar_class: &'static str) -> Element {
    let amount = value.value();
    rsx! {
        div { style: "display: flex; align-items: center; gap: 0.5rem;",
            div { class: "{bar_class}", style: "width: {width:.1}%;" }
            span { class: "bar-label", "{amount}" }
            if value.is_estimated() {
                span { class: "badge badge-estimated", title: "No live price data; estimated value", "est." }
            }
        }
    }
}

fn bar_rows(record: &ComparisonRecord) -> Vec<BarRow> {
    let max = record
        .deltas
        .iter()
        .flat_map(|entry| [entry.first.value(), entry.second.value()])
        .max()
        .unwrap_or(0);

    record
        .deltas
        .iter()
        .map(|entry| BarRow {
            label: entry.category.name(),
            first: entry.first,
            second: entry.second,
            first_width: bar_width(entry.first.value(), max),
            second_width: bar_width(entry.second.value(), max),
        })
        .collect()
}

fn bar_width(value: u32, max: u32) -> f64 {
    if max == 0 {
        0.0
    } else {
        // leave room for the value label
        value as f64 / max as f64 * 85.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CostOfLivingData;

    fn data(name: &str, housing: u32, food: u32, transport: u32, utilities: u32) -> CostOfLivingData {
        CostOfLivingData {
            city_name: name.to_string(),
            housing: CategoryValue::Measured(housing),
            food: CategoryValue::Measured(food),
            transport: CategoryValue::Estimated(transport),
            utilities: CategoryValue::Measured(utilities),
        }
    }

    #[test]
    fn bars_scale_to_the_largest_value() {
        let record = ComparisonRecord::new(data("A", 2000, 400, 100, 200), data("B", 1000, 500, 100, 0));
        let rows = bar_rows(&record);

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].label, "Housing");
        assert_eq!(rows[0].first_width, 85.0);
        assert_eq!(rows[0].second_width, 42.5);
        assert_eq!(rows[3].second_width, 0.0);
        assert!(rows[2].first.is_estimated());
    }

    #[test]
    fn empty_values_have_no_width() {
        assert_eq!(bar_width(0, 0), 0.0);
        assert_eq!(bar_width(5, 0), 0.0);
    }
}
