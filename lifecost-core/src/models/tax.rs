use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slice of a progressive federal tax schedule.
///
/// Brackets are contiguous and ordered by `min_income`; the final bracket
/// of a schedule has `max_income = None` (unbounded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

/// Full tax liability picture for one earner at a given gross income.
///
/// All amounts are annual dollars except `monthly_take_home`; the two
/// rates are ratios (0.247 = 24.7%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub federal_tax: Decimal,
    pub state_tax: Decimal,
    pub city_tax: Decimal,
    pub social_security: Decimal,
    pub medicare: Decimal,
    pub total_tax: Decimal,
    pub effective_rate: Decimal,
    pub marginal_rate: Decimal,
    pub take_home_pay: Decimal,
    pub monthly_take_home: Decimal,
}
