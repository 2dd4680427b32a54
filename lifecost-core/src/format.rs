//! Display formatting for money and rates.
//!
//! Money renders as whole US dollars with thousands separators; rates as
//! percentages with one decimal place. Every subcommand and report shares
//! these so figures line up across surfaces.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::calculations::common::round_to_dollar;

/// Formats an amount as whole US dollars.
///
/// # Arguments
///
/// * `amount` - The amount to format
///
/// # Returns
///
/// The amount rounded half-up to whole dollars, grouped in thousands,
/// with a leading `$` (after the sign for negatives).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use lifecost_core::format::format_currency;
///
/// assert_eq!(format_currency(dec!(75297)), "$75,297");
/// assert_eq!(format_currency(dec!(-1234.50)), "-$1,235");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_to_dollar(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}", group_thousands(&rounded.abs().to_string()))
}

/// Formats a fractional rate as a percentage with one decimal place.
///
/// # Arguments
///
/// * `rate` - The rate as a fraction (0.247 is 24.7%)
///
/// # Returns
///
/// The rate scaled to percent, rounded half-up to one decimal place.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use lifecost_core::format::format_rate;
///
/// assert_eq!(format_rate(dec!(0.24703)), "24.7%");
/// assert_eq!(format_rate(dec!(0)), "0.0%");
/// ```
pub fn format_rate(rate: Decimal) -> String {
    let mut percent =
        (rate * dec!(100)).round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    percent.rescale(1);
    format!("{percent}%")
}

/// Inserts a comma before every group of three digits.
fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut grouped = String::with_capacity(chars.len() + chars.len() / 3);
    for (i, ch) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*ch);
    }
    grouped
}
