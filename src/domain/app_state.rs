use serde::{Deserialize, Serialize};

use super::comparison::CompareError;
use crate::util::settings::Settings;

/// The two cities picked on the selection page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySelection {
    pub first: String,
    pub second: String,
}

impl CitySelection {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.first.trim().is_empty() && !self.second.trim().is_empty()
    }

    /// Trimmed city pair, or the reason navigation must be blocked.
    pub fn validated(&self) -> Result<(String, String), CompareError> {
        if !self.is_complete() {
            return Err(CompareError::MissingCity);
        }
        Ok((
            self.first.trim().to_string(),
            self.second.trim().to_string(),
        ))
    }

    pub fn swapped(&self) -> Self {
        Self {
            first: self.second.clone(),
            second: self.first.clone(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub settings: Settings,
    pub selection: CitySelection,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            selection: CitySelection::default(),
        }
    }
}
