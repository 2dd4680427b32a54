//! State income tax rate approximations.
//!
//! Rates are flat top-rate approximations per state, not bracket walks.
//! Unknown codes fall back to a regional average, then to a flat default.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Rate applied when a state code matches no table and no region.
pub const DEFAULT_STATE_RATE: Decimal = dec!(0.05);

/// Census-style region groupings used for fallback rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Northeast,
    Midwest,
    South,
    West,
}

impl Region {
    pub fn rate(self) -> Decimal {
        match self {
            Region::Northeast => dec!(0.06),
            Region::Midwest => dec!(0.05),
            Region::South => dec!(0.05),
            Region::West => dec!(0.07),
        }
    }
}

/// Exact per-state rate, including the no-income-tax states at zero.
pub fn exact_state_rate(state: &str) -> Option<Decimal> {
    let rate = match state.trim().to_ascii_uppercase().as_str() {
        "AL" => dec!(0.05),
        "AK" => dec!(0),
        "AZ" => dec!(0.0459),
        "AR" => dec!(0.055),
        "CA" => dec!(0.133),
        "CO" => dec!(0.0444),
        "CT" => dec!(0.0699),
        "DE" => dec!(0.066),
        "FL" => dec!(0),
        "GA" => dec!(0.0575),
        "HI" => dec!(0.11),
        "ID" => dec!(0.058),
        "IL" => dec!(0.0495),
        "IN" => dec!(0.0323),
        "IA" => dec!(0.06),
        "KS" => dec!(0.057),
        "KY" => dec!(0.045),
        "LA" => dec!(0.0425),
        "ME" => dec!(0.0715),
        "MD" => dec!(0.0575),
        "MA" => dec!(0.05),
        "MI" => dec!(0.0425),
        "MN" => dec!(0.0985),
        "MS" => dec!(0.05),
        "MO" => dec!(0.0495),
        "MT" => dec!(0.0675),
        "NE" => dec!(0.0664),
        "NV" => dec!(0),
        "NH" => dec!(0.05),
        "NJ" => dec!(0.1075),
        "NM" => dec!(0.059),
        "NY" => dec!(0.109),
        "NC" => dec!(0.0499),
        "ND" => dec!(0.029),
        "OH" => dec!(0.0399),
        "OK" => dec!(0.0475),
        "OR" => dec!(0.099),
        "PA" => dec!(0.0307),
        "RI" => dec!(0.0599),
        "SC" => dec!(0.07),
        "SD" => dec!(0),
        "TN" => dec!(0),
        "TX" => dec!(0),
        "UT" => dec!(0.0485),
        "VT" => dec!(0.0875),
        "VA" => dec!(0.0575),
        "WA" => dec!(0),
        "WV" => dec!(0.065),
        "WI" => dec!(0.0765),
        "WY" => dec!(0),
        "DC" => dec!(0.0995),
        _ => return None,
    };
    Some(rate)
}

/// Region a state code belongs to, if recognized.
pub fn state_region(state: &str) -> Option<Region> {
    let region = match state.trim().to_ascii_uppercase().as_str() {
        "ME" | "NH" | "VT" | "MA" | "RI" | "CT" | "NY" | "NJ" | "PA" => Region::Northeast,
        "OH" | "IN" | "IL" | "MI" | "WI" | "MN" | "IA" | "MO" | "ND" | "SD" | "NE" | "KS" => {
            Region::Midwest
        }
        "DE" | "MD" | "DC" | "VA" | "WV" | "NC" | "SC" | "GA" | "FL" | "KY" | "TN" | "AL"
        | "MS" | "AR" | "LA" | "OK" | "TX" => Region::South,
        "MT" | "ID" | "WY" | "CO" | "NM" | "AZ" | "UT" | "NV" | "CA" | "OR" | "WA" | "AK"
        | "HI" => Region::West,
        _ => return None,
    };
    Some(region)
}

/// Resolves the rate for a state code through the fallback chain:
/// exact table, then region average, then [`DEFAULT_STATE_RATE`].
pub fn state_rate(state: &str) -> Decimal {
    if let Some(rate) = exact_state_rate(state) {
        return rate;
    }
    if let Some(region) = state_region(state) {
        tracing::debug!(state, ?region, "state rate resolved via region fallback");
        return region.rate();
    }
    tracing::debug!(state, "unrecognized state code, using default rate");
    DEFAULT_STATE_RATE
}
