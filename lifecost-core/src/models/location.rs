use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when validating a location.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    /// The cost-of-living multiplier must be strictly positive.
    #[error("cost multiplier must be positive, got {0}")]
    NonPositiveMultiplier(Decimal),
}

/// Where the household lives.
///
/// `cost_multiplier` is a ratio against the US national average (1.0);
/// values below 1.0 are valid for cheap locations and there is no upper
/// clamp for expensive custom entries. `is_custom` distinguishes a
/// free-form entry from a curated preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
    pub cost_multiplier: Decimal,
    pub is_custom: bool,
}

impl Location {
    pub fn validate(&self) -> Result<(), LocationError> {
        if self.cost_multiplier <= Decimal::ZERO {
            return Err(LocationError::NonPositiveMultiplier(self.cost_multiplier));
        }
        Ok(())
    }
}

/// A curated city with a known cost-of-living multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationPreset {
    pub name: String,
    pub state: String,
    pub country: String,
    pub cost_multiplier: Decimal,
}

impl LocationPreset {
    pub fn to_location(&self) -> Location {
        Location {
            city: self.name.clone(),
            state: self.state.clone(),
            country: self.country.clone(),
            cost_multiplier: self.cost_multiplier,
            is_custom: false,
        }
    }
}
