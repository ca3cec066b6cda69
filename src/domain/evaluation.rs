use super::entities::{Category, CategoryValue, CostOfLivingData, FallbackRange, PriceItem};
use super::fallback::FallbackSource;

/// Rounded mean price of the items matching `category`, or `None` when
/// nothing matched.
pub fn category_average(items: &[PriceItem], category: Category) -> Option<u32> {
    let (sum, count) = items
        .iter()
        .filter(|item| category.matches(&item.name))
        .fold((0.0_f64, 0_usize), |(sum, count), item| {
            let price = if item.price.is_finite() {
                item.price
            } else {
                0.0
            };
            (sum + price, count + 1)
        });

    if count == 0 {
        return None;
    }

    Some(round_non_negative(sum / count as f64))
}

/// Reduces a price list to the four category values. Categories without any
/// matching items are estimated from [`FallbackRange::UNMATCHED`].
pub fn evaluate_city(
    city_name: &str,
    items: &[PriceItem],
    source: &dyn FallbackSource,
) -> CostOfLivingData {
    let value = |category: Category| match category_average(items, category) {
        Some(average) => CategoryValue::Measured(average),
        None => CategoryValue::Estimated(source.draw(FallbackRange::UNMATCHED)),
    };

    CostOfLivingData {
        city_name: city_name.to_string(),
        housing: value(Category::Housing),
        food: value(Category::Food),
        transport: value(Category::Transport),
        utilities: value(Category::Utilities),
    }
}

/// Fully synthetic record used when the pricing source failed.
pub fn estimate_city(city_name: &str, source: &dyn FallbackSource) -> CostOfLivingData {
    let value = |category: Category| CategoryValue::Estimated(source.draw(category.fallback_range()));

    CostOfLivingData {
        city_name: city_name.to_string(),
        housing: value(Category::Housing),
        food: value(Category::Food),
        transport: value(Category::Transport),
        utilities: value(Category::Utilities),
    }
}

fn round_non_negative(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fallback::SeededSource;

    fn item(name: &str, price: f64) -> PriceItem {
        PriceItem {
            name: name.to_string(),
            price,
        }
    }

    /// Always returns the lower bound so estimated values are predictable.
    struct LowerBound;

    impl FallbackSource for LowerBound {
        fn in_range(&self, min: u32, _max: u32) -> u32 {
            min
        }
    }

    #[test]
    fn housing_average_is_rounded_mean() {
        let items = vec![item("Rent", 2000.0), item("Apartment", 1800.0)];
        assert_eq!(category_average(&items, Category::Housing), Some(1900));
    }

    #[test]
    fn rounding_goes_to_nearest_integer() {
        let items = vec![item("Meal at a restaurant", 12.4), item("Grocery basket", 13.0)];
        assert_eq!(category_average(&items, Category::Food), Some(13));
        let items = vec![item("Taxi 1km", 1.2), item("Bus ticket", 1.0)];
        assert_eq!(category_average(&items, Category::Transport), Some(1));
    }

    #[test]
    fn zero_priced_items_still_count() {
        let items = vec![item("Internet", 60.0), item("Mobile plan", 0.0)];
        assert_eq!(category_average(&items, Category::Utilities), Some(30));
    }

    #[test]
    fn evaluate_city_marks_measured_and_estimated() {
        let items = vec![
            item("Rent 1 bedroom", 1500.0),
            item("Meal, Inexpensive Restaurant", 15.0),
            item("Taxi Start", 4.0),
        ];
        let data = evaluate_city("Porto", &items, &LowerBound);

        assert_eq!(data.city_name, "Porto");
        assert_eq!(data.housing, CategoryValue::Measured(1500));
        assert_eq!(data.food, CategoryValue::Measured(15));
        assert_eq!(data.transport, CategoryValue::Measured(4));
        assert_eq!(data.utilities, CategoryValue::Estimated(100));
    }

    #[test]
    fn unmatched_categories_fall_in_wide_range() {
        let source = SeededSource::new(3);
        let data = evaluate_city("Nowhere", &[], &source);
        for category in Category::ALL {
            let value = data.get(category);
            assert!(value.is_estimated());
            assert!(FallbackRange::UNMATCHED.contains(value.value()));
        }
    }

    #[test]
    fn estimate_city_uses_primary_ranges() {
        let source = SeededSource::new(11);
        for _ in 0..50 {
            let data = estimate_city("Oslo", &source);
            assert!(data.is_fully_estimated());
            for category in Category::ALL {
                assert!(category.fallback_range().contains(data.get(category).value()));
            }
        }
    }
}
