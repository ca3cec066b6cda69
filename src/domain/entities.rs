use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of cost dimensions compared between two cities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Housing,
    Food,
    Transport,
    Utilities,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Housing,
        Category::Food,
        Category::Transport,
        Category::Utilities,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Housing => "Housing",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
        }
    }

    /// Line items whose name contains one of these (case-insensitive) count
    /// towards the category average.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Housing => &["Rent", "Apartment", "House"],
            Category::Food => &["Meal", "Food", "Grocery"],
            Category::Transport => &["Transportation", "Taxi", "Bus"],
            Category::Utilities => &["Utilities", "Internet", "Mobile"],
        }
    }

    /// Range used when the pricing source could not be reached at all.
    pub fn fallback_range(&self) -> FallbackRange {
        match self {
            Category::Housing => FallbackRange::new(1000, 2000),
            Category::Food => FallbackRange::new(200, 500),
            Category::Transport => FallbackRange::new(50, 150),
            Category::Utilities => FallbackRange::new(100, 300),
        }
    }

    pub fn matches(&self, item_name: &str) -> bool {
        let name = item_name.to_lowercase();
        self.keywords()
            .iter()
            .any(|keyword| name.contains(&keyword.to_lowercase()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive bounds for synthetic category values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FallbackRange {
    pub min: u32,
    pub max: u32,
}

impl FallbackRange {
    /// Used for a category that had no matching line items in an otherwise
    /// successful response.
    pub const UNMATCHED: FallbackRange = FallbackRange::new(100, 1000);

    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// One line item reported by the pricing source.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceItem {
    pub name: String,
    pub price: f64,
}

/// A category value together with where it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryValue {
    /// Averaged from real line items.
    Measured(u32),
    /// Drawn from a fallback range.
    Estimated(u32),
}

impl CategoryValue {
    pub fn value(&self) -> u32 {
        match self {
            CategoryValue::Measured(value) | CategoryValue::Estimated(value) => *value,
        }
    }

    pub fn is_estimated(&self) -> bool {
        matches!(self, CategoryValue::Estimated(_))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostOfLivingData {
    pub city_name: String,
    pub housing: CategoryValue,
    pub food: CategoryValue,
    pub transport: CategoryValue,
    pub utilities: CategoryValue,
}

impl CostOfLivingData {
    pub fn get(&self, category: Category) -> CategoryValue {
        match category {
            Category::Housing => self.housing,
            Category::Food => self.food,
            Category::Transport => self.transport,
            Category::Utilities => self.utilities,
        }
    }

    pub fn total(&self) -> u64 {
        Category::ALL
            .iter()
            .map(|category| self.get(*category).value() as u64)
            .sum()
    }

    pub fn has_estimates(&self) -> bool {
        Category::ALL
            .iter()
            .any(|category| self.get(*category).is_estimated())
    }

    pub fn is_fully_estimated(&self) -> bool {
        Category::ALL
            .iter()
            .all(|category| self.get(*category).is_estimated())
    }
}
