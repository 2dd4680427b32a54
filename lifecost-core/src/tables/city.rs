//! Municipal income tax rates.
//!
//! Cities keyed by their common display name; a handful carry a state
//! suffix ("Kansas City KS", "Portland MI") to disambiguate. Lookups are
//! exact matches on the stored spelling.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Flat rate assumed for unlisted cities in states where municipal
/// income taxes are common.
pub const ASSUMED_CITY_RATE: Decimal = dec!(0.01);

/// Exact rate for a known city name.
pub fn exact_city_rate(city: &str) -> Option<Decimal> {
    let rate = match city {
        "New York City" => dec!(0.03876),
        "Philadelphia" => dec!(0.0371),
        "San Francisco" => dec!(0.0138),
        "Detroit" => dec!(0.0245),
        "Cincinnati" => dec!(0.019),
        "Cleveland" => dec!(0.024),
        "Columbus" => dec!(0.025),
        "St. Louis" => dec!(0.01),
        "Kansas City" => dec!(0.01),
        "Pittsburgh" => dec!(0.03),
        "Toledo" => dec!(0.0225),
        "Baltimore" => dec!(0.032),
        "Wilmington" => dec!(0.0125),
        "Portland" => dec!(0.0137),
        "Birmingham" => dec!(0.01),
        "Louisville" => dec!(0.0235),
        "Dayton" => dec!(0.0225),
        "Akron" => dec!(0.025),
        "Newark" => dec!(0.01),
        "Youngstown" => dec!(0.025),
        "Grand Rapids" => dec!(0.015),
        "Lansing" => dec!(0.01),
        "Flint" => dec!(0.01),
        "Indianapolis" => dec!(0.0202),
        "Scranton" => dec!(0.0235),
        "Reading" => dec!(0.0235),
        "Erie" => dec!(0.018),
        "Allentown" => dec!(0.015),
        "Yonkers" => dec!(0.016675),
        "Kansas City KS" => dec!(0.01),
        "Warren" => dec!(0.01),
        "Pontiac" => dec!(0.01),
        "Battle Creek" => dec!(0.01),
        "Jackson MI" => dec!(0.01),
        "Springfield OH" => dec!(0.02),
        "Saginaw" => dec!(0.015),
        "Benton Harbor" => dec!(0.01),
        "Albion" => dec!(0.01),
        "Big Rapids" => dec!(0.01),
        "East Lansing" => dec!(0.01),
        "Gahanna" => dec!(0.015),
        "Hamtramck" => dec!(0.01),
        "Highland Park" => dec!(0.02),
        "Ionia" => dec!(0.01),
        "Lapeer" => dec!(0.01),
        "Muskegon" => dec!(0.01),
        "Muskegon Heights" => dec!(0.01),
        "Port Huron" => dec!(0.01),
        "Portland MI" => dec!(0.01),
        "Lancaster" => dec!(0.019),
        _ => return None,
    };
    Some(rate)
}

/// Whether unlisted cities in this state are assumed to levy a local
/// income tax.
pub fn city_tax_prone(state: &str) -> bool {
    matches!(
        state.trim().to_ascii_uppercase().as_str(),
        "OH" | "PA" | "NY" | "MI" | "MO" | "KY" | "IN" | "MD" | "AL"
    )
}

/// Resolves the municipal rate for an optional city within a state.
///
/// No city (or a blank name) means no city tax. Known cities use their
/// table rate; unknown cities pay [`ASSUMED_CITY_RATE`] only in
/// city-tax-prone states.
pub fn city_rate(city: Option<&str>, state: &str) -> Decimal {
    let Some(city) = city else {
        return Decimal::ZERO;
    };
    if city.trim().is_empty() {
        return Decimal::ZERO;
    }
    if let Some(rate) = exact_city_rate(city) {
        return rate;
    }
    if city_tax_prone(state) {
        return ASSUMED_CITY_RATE;
    }
    Decimal::ZERO
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // =========================================================================
    // exact_city_rate tests
    // =========================================================================

    #[test]
    fn exact_rate_for_new_york_city() {
        assert_eq!(exact_city_rate("New York City"), Some(dec!(0.03876)));
    }

    #[test]
    fn exact_rate_is_spelling_sensitive() {
        assert_eq!(exact_city_rate("new york city"), None);
    }

    #[test]
    fn exact_rate_distinguishes_suffixed_entries() {
        assert_eq!(exact_city_rate("Kansas City"), Some(dec!(0.01)));
        assert_eq!(exact_city_rate("Kansas City KS"), Some(dec!(0.01)));
        assert_eq!(exact_city_rate("Portland"), Some(dec!(0.0137)));
        assert_eq!(exact_city_rate("Portland MI"), Some(dec!(0.01)));
    }

    #[test]
    fn exact_rate_rejects_unknown_city() {
        assert_eq!(exact_city_rate("Gotham"), None);
    }

    // =========================================================================
    // city_tax_prone tests
    // =========================================================================

    #[test]
    fn ohio_is_city_tax_prone() {
        assert!(city_tax_prone("OH"));
    }

    #[test]
    fn texas_is_not_city_tax_prone() {
        assert!(!city_tax_prone("TX"));
    }

    #[test]
    fn prone_check_normalizes_case() {
        assert!(city_tax_prone("pa"));
    }

    // =========================================================================
    // city_rate tests
    // =========================================================================

    #[test]
    fn rate_without_city_is_zero() {
        assert_eq!(city_rate(None, "NY"), dec!(0));
    }

    #[test]
    fn rate_for_blank_city_is_zero() {
        assert_eq!(city_rate(Some("  "), "NY"), dec!(0));
    }

    #[test]
    fn rate_for_known_city() {
        assert_eq!(city_rate(Some("Philadelphia"), "PA"), dec!(0.0371));
    }

    #[test]
    fn rate_for_unknown_city_in_prone_state_is_assumed() {
        assert_eq!(city_rate(Some("Canton"), "OH"), ASSUMED_CITY_RATE);
    }

    #[test]
    fn rate_for_unknown_city_outside_prone_state_is_zero() {
        assert_eq!(city_rate(Some("Houston"), "TX"), dec!(0));
    }

    #[test]
    fn table_rate_wins_even_outside_prone_state() {
        // San Francisco is listed even though CA is not a prone state.
        assert_eq!(city_rate(Some("San Francisco"), "CA"), dec!(0.0138));
    }
}
