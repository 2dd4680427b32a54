//! Compiled-in location presets.
//!
//! A starter set of metro areas with cost-of-living multipliers relative
//! to the national baseline of 1.0. Stores seed these on first migration
//! and may grow the list through the CSV importer.

use std::sync::OnceLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::LocationPreset;

static CITY_PRESETS: OnceLock<Vec<LocationPreset>> = OnceLock::new();

fn preset(name: &str, state: &str, cost_multiplier: Decimal) -> LocationPreset {
    LocationPreset {
        name: name.to_string(),
        state: state.to_string(),
        country: "United States".to_string(),
        cost_multiplier,
    }
}

/// The built-in presets, in display order.
pub fn city_presets() -> &'static [LocationPreset] {
    CITY_PRESETS.get_or_init(|| {
        vec![
            preset("New York City", "NY", dec!(2.3)),
            preset("San Francisco", "CA", dec!(2.4)),
            preset("Miami", "FL", dec!(1.6)),
            preset("Denver", "CO", dec!(1.4)),
            preset("Chicago", "IL", dec!(1.5)),
            preset("Seattle", "WA", dec!(1.7)),
            preset("Los Angeles", "CA", dec!(2.0)),
            preset("Austin", "TX", dec!(1.3)),
            preset("Detroit", "MI", dec!(0.9)),
            preset("Atlanta", "GA", dec!(1.2)),
        ]
    })
}

/// The preset new wizards start from.
pub fn default_preset() -> &'static LocationPreset {
    &city_presets()[0]
}
