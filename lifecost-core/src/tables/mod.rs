//! Compiled-in rate and preset tables.
//!
//! Federal bracket schedules, flat state/city rate approximations, and the
//! starter set of location presets. Everything here is data; the
//! calculation logic that consumes it lives in [`crate::calculations`].

pub mod city;
pub mod federal;
pub mod presets;
pub mod state;

pub use city::{city_rate, city_tax_prone, exact_city_rate, ASSUMED_CITY_RATE};
pub use federal::federal_brackets;
pub use presets::{city_presets, default_preset};
pub use state::{exact_state_rate, state_rate, state_region, Region, DEFAULT_STATE_RATE};
