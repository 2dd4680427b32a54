//! 2024 federal income tax brackets.

use std::sync::OnceLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxBracket;

static SINGLE_BRACKETS: OnceLock<Vec<TaxBracket>> = OnceLock::new();
static MARRIED_BRACKETS: OnceLock<Vec<TaxBracket>> = OnceLock::new();

fn bracket(min_income: Decimal, max_income: Option<Decimal>, rate: Decimal) -> TaxBracket {
    TaxBracket {
        min_income,
        max_income,
        rate,
    }
}

/// Returns the bracket table for the given filing situation, ordered by
/// ascending income. The final bracket is unbounded.
pub fn federal_brackets(married: bool) -> &'static [TaxBracket] {
    if married {
        MARRIED_BRACKETS.get_or_init(|| {
            vec![
                bracket(dec!(0), Some(dec!(23200)), dec!(0.10)),
                bracket(dec!(23200), Some(dec!(94300)), dec!(0.12)),
                bracket(dec!(94300), Some(dec!(201050)), dec!(0.22)),
                bracket(dec!(201050), Some(dec!(383900)), dec!(0.24)),
                bracket(dec!(383900), Some(dec!(487450)), dec!(0.32)),
                bracket(dec!(487450), Some(dec!(731200)), dec!(0.35)),
                bracket(dec!(731200), None, dec!(0.37)),
            ]
        })
    } else {
        SINGLE_BRACKETS.get_or_init(|| {
            vec![
                bracket(dec!(0), Some(dec!(11600)), dec!(0.10)),
                bracket(dec!(11600), Some(dec!(47150)), dec!(0.12)),
                bracket(dec!(47150), Some(dec!(100525)), dec!(0.22)),
                bracket(dec!(100525), Some(dec!(191950)), dec!(0.24)),
                bracket(dec!(191950), Some(dec!(243725)), dec!(0.32)),
                bracket(dec!(243725), Some(dec!(609350)), dec!(0.35)),
                bracket(dec!(609350), None, dec!(0.37)),
            ]
        })
    }
}
