use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_to_dollar;
use crate::calculations::income::IncomePlan;
use crate::models::category::ExpenseCategory;
use crate::models::family::{FamilyStatus, Relationship};
use crate::models::lifestyle::Lifestyle;
use crate::models::location::Location;

/// A saved lifestyle plan.
///
/// Inputs are what the owner chose; the income fields are derived from an
/// [`IncomePlan`] and stay `None` until one has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: i64,
    pub name: String,
    pub user_id: String,
    pub user_name: String,
    pub is_public: bool,

    // Chosen inputs
    pub lifestyle: Lifestyle,
    pub location: Location,
    pub family: FamilyStatus,
    pub custom_expenses: Option<BTreeMap<ExpenseCategory, Decimal>>,

    // Derived from the income plan
    pub monthly_income: Option<Decimal>,
    pub yearly_income: Option<Decimal>,
    pub monthly_expenses: Option<Decimal>,
    pub children_expenses: Option<Decimal>,
    pub adjusted_outflows: BTreeMap<ExpenseCategory, Decimal>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// For creating new scenarios (no id, timestamps or derived fields)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScenario {
    pub name: String,
    pub user_id: String,
    pub user_name: String,
    pub is_public: bool,
    pub lifestyle: Lifestyle,
    pub location: Location,
    pub family: FamilyStatus,
    pub custom_expenses: Option<BTreeMap<ExpenseCategory, Decimal>>,
}

impl Scenario {
    /// Copies a computed income plan into the derived fields.
    pub fn apply_plan(&mut self, plan: &IncomePlan) {
        self.monthly_income = Some(plan.monthly_income);
        self.yearly_income = Some(plan.yearly_income);
        self.monthly_expenses = Some(plan.monthly_expenses);
        self.children_expenses = Some(plan.children_expenses);
        self.adjusted_outflows = plan.adjusted_outflows.clone();
    }
}

/// Builds the default display name for a scenario.
///
/// Custom locations show "City, ST"; presets show just the city. The
/// family suffix reads " - Family of N", " - Couple" or
/// " - Single Parent (N children)" depending on composition.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use lifecost_core::models::{default_scenario_name, FamilyStatus, Location, Relationship};
///
/// let location = Location {
///     city: "Austin".to_string(),
///     state: "TX".to_string(),
///     country: "United States".to_string(),
///     cost_multiplier: dec!(1.3),
///     is_custom: false,
/// };
/// let family = FamilyStatus {
///     relationship: Relationship::Partnered,
///     num_children: 2,
///     partner_income: dec!(0),
/// };
/// let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
///
/// assert_eq!(
///     default_scenario_name(&location, &family, date),
///     "Austin - Family of 4 (2024-06-01)"
/// );
/// ```
pub fn default_scenario_name(
    location: &Location,
    family: &FamilyStatus,
    date: NaiveDate,
) -> String {
    let location_part = if location.is_custom {
        format!("{}, {}", location.city, location.state)
    } else {
        location.city.clone()
    };

    let family_part = match (family.relationship, family.num_children) {
        (Relationship::Partnered, 0) => " - Couple".to_string(),
        (Relationship::Partnered, n) => format!(" - Family of {}", 2 + n),
        (Relationship::Single, 0) => String::new(),
        (Relationship::Single, 1) => " - Single Parent (1 child)".to_string(),
        (Relationship::Single, n) => format!(" - Single Parent ({n} children)"),
    };

    format!("{}{} ({})", location_part, family_part, date.format("%Y-%m-%d"))
}

/// How a required income relates to what the owner currently earns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeComparison {
    /// Required yearly income minus current income; negative when the
    /// current income already covers the lifestyle.
    pub gap: Decimal,
    /// Current income is known and already meets the requirement.
    pub meets_target: bool,
    /// Increase needed as a percentage of current income; 100 when the
    /// current income is unknown or zero.
    pub percent_increase: Decimal,
    /// More than a 200% raise would be needed.
    pub steep_increase: bool,
}

impl IncomeComparison {
    pub fn compare(required_yearly_income: Decimal, current_income: Decimal) -> Self {
        let gap = required_yearly_income - current_income;
        let has_current = current_income > Decimal::ZERO;
        let percent_increase = if has_current {
            gap / current_income * dec!(100)
        } else {
            dec!(100)
        };

        Self {
            gap,
            meets_target: has_current && gap <= Decimal::ZERO,
            percent_increase,
            steep_increase: percent_increase > dec!(200),
        }
    }
}

/// Household income once the partner's earnings are added, rounded to
/// whole dollars.
pub fn combined_annual_income(
    required_yearly_income: Decimal,
    partner_income: Decimal,
) -> Decimal {
    round_to_dollar(required_yearly_income + partner_income)
}

pub fn combined_monthly_income(
    required_yearly_income: Decimal,
    partner_income: Decimal,
) -> Decimal {
    round_to_dollar(combined_annual_income(required_yearly_income, partner_income) / dec!(12))
}
