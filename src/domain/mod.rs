//! Cost-of-living data and the comparison built on top of it.

pub mod app_state;
pub mod comparison;
pub mod entities;
pub mod evaluation;
pub mod fallback;

pub use app_state::{AppState, CitySelection};
pub use comparison::{compare, ComparisonRecord, CostProvider, Delta, Direction};
pub use entities::{Category, CategoryValue, CostOfLivingData, PriceItem};
pub use evaluation::{estimate_city, evaluate_city};
pub use fallback::{FallbackSource, SeededSource, ThreadRngSource};
