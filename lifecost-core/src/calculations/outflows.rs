//! Monthly outflow aggregation.
//!
//! Turns a lifestyle choice (or a custom per-category budget), family
//! composition, and location into the monthly spending the household has
//! to fund. Applied in order:
//!
//! | Step | Adjustment |
//! |------|------------|
//! | 1    | Base amounts: custom budget verbatim, else the lifestyle table |
//! | 2    | Partner multiplier per category when partnered |
//! | 3    | Cost-of-living multiplier, except savings and investments |
//! | 4    | Round each category to whole dollars |
//! | 5    | Children: per-child cost × multiplier, rounded, × headcount |
//! | 6    | Total = rounded sum of categories plus children |
//!
//! Partner multipliers apply whenever a partner is present, whether or not
//! they earn; savings and investments are targets rather than local
//! spending and ignore the location multiplier.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use lifecost_core::calculations::outflows::aggregate;
//! use lifecost_core::models::{FamilyStatus, Lifestyle, Location};
//!
//! let location = Location {
//!     city: "Austin".to_string(),
//!     state: "TX".to_string(),
//!     country: "United States".to_string(),
//!     cost_multiplier: dec!(1.0),
//!     is_custom: false,
//! };
//!
//! let outflows = aggregate(
//!     Lifestyle::Modest,
//!     None,
//!     &FamilyStatus::default(),
//!     &location,
//! ).unwrap();
//!
//! // At the 1.0 baseline a single adult pays the table amounts as-is.
//! assert_eq!(outflows.total, dec!(4150));
//! assert_eq!(outflows.children, dec!(0));
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_to_dollar;
use crate::models::{ExpenseCategory, FamilyStatus, Lifestyle, Location, LocationError};

/// Errors that can occur while aggregating outflows.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutflowError {
    /// The location failed validation.
    #[error(transparent)]
    InvalidLocation(#[from] LocationError),

    /// A custom budget amount was negative.
    #[error("monthly amount for {} must be non-negative, got {amount}", category.as_str())]
    NegativeExpense {
        category: ExpenseCategory,
        amount: Decimal,
    },
}

/// Aggregated monthly spending, in whole dollars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyOutflows {
    /// Adjusted amount per spending category. Mirrors the keys of the
    /// input budget: categories missing from a custom budget stay
    /// missing here.
    pub by_category: BTreeMap<ExpenseCategory, Decimal>,

    /// Combined cost for all children, zero for childless households.
    pub children: Decimal,

    /// Sum of every category plus children.
    pub total: Decimal,
}

/// Computes the monthly outflows for a household.
///
/// A custom budget takes precedence over the lifestyle table; any
/// `children` entry in it is ignored because child costs are derived
/// from the family composition, not budgeted per category.
///
/// # Arguments
///
/// * `lifestyle` - Tier all defaults are drawn from
/// * `custom_expenses` - Optional per-category budget overriding the tier
/// * `family` - Household composition driving partner and child costs
/// * `location` - Where the household lives; carries the cost multiplier
///
/// # Errors
///
/// Returns [`OutflowError`] if the location's cost multiplier is not
/// positive or a custom amount is negative.
pub fn aggregate(
    lifestyle: Lifestyle,
    custom_expenses: Option<&BTreeMap<ExpenseCategory, Decimal>>,
    family: &FamilyStatus,
    location: &Location,
) -> Result<MonthlyOutflows, OutflowError> {
    location.validate()?;

    let base: BTreeMap<ExpenseCategory, Decimal> = match custom_expenses {
        Some(budget) => {
            let mut base = BTreeMap::new();
            for (&category, &amount) in budget {
                if category == ExpenseCategory::Children {
                    continue;
                }
                if amount < Decimal::ZERO {
                    return Err(OutflowError::NegativeExpense { category, amount });
                }
                base.insert(category, amount);
            }
            base
        }
        None => lifestyle.default_outflows(),
    };

    let mut by_category = BTreeMap::new();
    for (category, amount) in base {
        by_category.insert(category, adjust(category, amount, family, location));
    }

    let children = children_cost(lifestyle, family, location);
    let total = round_to_dollar(by_category.values().sum::<Decimal>() + children);

    Ok(MonthlyOutflows {
        by_category,
        children,
        total,
    })
}

/// Applies the partner and location multipliers to one category and
/// rounds to whole dollars.
fn adjust(
    category: ExpenseCategory,
    base: Decimal,
    family: &FamilyStatus,
    location: &Location,
) -> Decimal {
    let mut amount = base;
    if family.is_partnered() {
        amount *= category.partner_multiplier();
    }
    if category.location_sensitive() {
        amount *= location.cost_multiplier;
    }
    round_to_dollar(amount)
}

/// Cost of raising the household's children at this location.
///
/// The per-child cost is scaled by the location multiplier and rounded
/// before being multiplied by the headcount, so every child costs the
/// same whole-dollar amount.
fn children_cost(
    lifestyle: Lifestyle,
    family: &FamilyStatus,
    location: &Location,
) -> Decimal {
    if family.num_children == 0 {
        return Decimal::ZERO;
    }

    let per_child = round_to_dollar(lifestyle.base_child_cost() * location.cost_multiplier);
    round_to_dollar(per_child * Decimal::from(family.num_children))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::Relationship;

    use super::*;

    fn baseline_location() -> Location {
        Location {
            city: "Austin".to_string(),
            state: "TX".to_string(),
            country: "United States".to_string(),
            cost_multiplier: dec!(1.0),
            is_custom: false,
        }
    }

    fn scaled_location(cost_multiplier: Decimal) -> Location {
        Location {
            cost_multiplier,
            ..baseline_location()
        }
    }

    fn partnered(num_children: u32) -> FamilyStatus {
        FamilyStatus {
            relationship: Relationship::Partnered,
            num_children,
            partner_income: dec!(0),
        }
    }

    // =========================================================================
    // base amount tests
    // =========================================================================

    #[test]
    fn modest_single_at_baseline_keeps_table_amounts() {
        let outflows = aggregate(
            Lifestyle::Modest,
            None,
            &FamilyStatus::default(),
            &baseline_location(),
        )
        .unwrap();

        assert_eq!(outflows.by_category, Lifestyle::Modest.default_outflows());
        assert_eq!(outflows.children, dec!(0));
        assert_eq!(outflows.total, dec!(4150));
    }

    #[test]
    fn every_spending_category_is_present_without_custom_budget() {
        let outflows = aggregate(
            Lifestyle::Comfortable,
            None,
            &FamilyStatus::default(),
            &baseline_location(),
        )
        .unwrap();

        assert_eq!(outflows.by_category.len(), ExpenseCategory::spending().len());
    }

    #[test]
    fn custom_budget_replaces_the_tier_table() {
        let mut budget = BTreeMap::new();
        budget.insert(ExpenseCategory::Housing, dec!(2000));
        budget.insert(ExpenseCategory::Food, dec!(600));

        let outflows = aggregate(
            Lifestyle::Custom,
            Some(&budget),
            &FamilyStatus::default(),
            &baseline_location(),
        )
        .unwrap();

        assert_eq!(outflows.by_category.len(), 2);
        assert_eq!(outflows.total, dec!(2600));
    }

    #[test]
    fn custom_budget_missing_categories_stay_missing() {
        let mut budget = BTreeMap::new();
        budget.insert(ExpenseCategory::Housing, dec!(2000));

        let outflows = aggregate(
            Lifestyle::Custom,
            Some(&budget),
            &FamilyStatus::default(),
            &baseline_location(),
        )
        .unwrap();

        assert!(!outflows.by_category.contains_key(&ExpenseCategory::Food));
    }

    #[test]
    fn custom_budget_children_entry_is_ignored() {
        let mut budget = BTreeMap::new();
        budget.insert(ExpenseCategory::Housing, dec!(2000));
        budget.insert(ExpenseCategory::Children, dec!(9999));

        let outflows = aggregate(
            Lifestyle::Custom,
            Some(&budget),
            &FamilyStatus::default(),
            &baseline_location(),
        )
        .unwrap();

        assert!(!outflows.by_category.contains_key(&ExpenseCategory::Children));
        assert_eq!(outflows.total, dec!(2000));
    }

    #[test]
    fn negative_custom_amount_is_rejected() {
        let mut budget = BTreeMap::new();
        budget.insert(ExpenseCategory::Housing, dec!(-100));

        let result = aggregate(
            Lifestyle::Custom,
            Some(&budget),
            &FamilyStatus::default(),
            &baseline_location(),
        );

        assert_eq!(
            result,
            Err(OutflowError::NegativeExpense {
                category: ExpenseCategory::Housing,
                amount: dec!(-100),
            })
        );
    }

    #[test]
    fn invalid_location_is_rejected() {
        let result = aggregate(
            Lifestyle::Modest,
            None,
            &FamilyStatus::default(),
            &scaled_location(dec!(0)),
        );

        assert!(matches!(result, Err(OutflowError::InvalidLocation(_))));
    }

    // =========================================================================
    // partner multiplier tests
    // =========================================================================

    #[test]
    fn partner_multipliers_apply_when_partnered() {
        let outflows = aggregate(
            Lifestyle::Modest,
            None,
            &partnered(0),
            &baseline_location(),
        )
        .unwrap();

        // Housing is shared (×1.0), food is not (×1.8).
        assert_eq!(outflows.by_category[&ExpenseCategory::Housing], dec!(1500));
        assert_eq!(outflows.by_category[&ExpenseCategory::Food], dec!(720));
    }

    #[test]
    fn partner_multipliers_apply_even_with_no_partner_income() {
        let zero_income = partnered(0);
        let earning = FamilyStatus {
            partner_income: dec!(80000),
            ..partnered(0)
        };

        let without_income = aggregate(
            Lifestyle::Modest,
            None,
            &zero_income,
            &baseline_location(),
        )
        .unwrap();
        let with_income =
            aggregate(Lifestyle::Modest, None, &earning, &baseline_location()).unwrap();

        assert_eq!(without_income.by_category, with_income.by_category);
    }

    #[test]
    fn single_household_skips_partner_multipliers() {
        let outflows = aggregate(
            Lifestyle::Modest,
            None,
            &FamilyStatus::default(),
            &baseline_location(),
        )
        .unwrap();

        assert_eq!(outflows.by_category[&ExpenseCategory::Food], dec!(400));
    }

    // =========================================================================
    // location multiplier tests
    // =========================================================================

    #[test]
    fn location_multiplier_scales_spending_categories() {
        let outflows = aggregate(
            Lifestyle::Modest,
            None,
            &FamilyStatus::default(),
            &scaled_location(dec!(2.0)),
        )
        .unwrap();

        assert_eq!(outflows.by_category[&ExpenseCategory::Housing], dec!(3000));
    }

    #[test]
    fn savings_and_investments_ignore_the_location_multiplier() {
        let outflows = aggregate(
            Lifestyle::Modest,
            None,
            &FamilyStatus::default(),
            &scaled_location(dec!(2.0)),
        )
        .unwrap();

        assert_eq!(outflows.by_category[&ExpenseCategory::Savings], dec!(500));
        assert_eq!(
            outflows.by_category[&ExpenseCategory::Investments],
            dec!(300)
        );
    }

    #[test]
    fn below_baseline_multiplier_shrinks_spending() {
        let outflows = aggregate(
            Lifestyle::Modest,
            None,
            &FamilyStatus::default(),
            &scaled_location(dec!(0.9)),
        )
        .unwrap();

        assert_eq!(outflows.by_category[&ExpenseCategory::Housing], dec!(1350));
    }

    #[test]
    fn category_amounts_round_half_up_to_whole_dollars() {
        // Personal 100 × 1.115 = 111.50, rounds to 112.
        let outflows = aggregate(
            Lifestyle::Modest,
            None,
            &FamilyStatus::default(),
            &scaled_location(dec!(1.115)),
        )
        .unwrap();

        assert_eq!(outflows.by_category[&ExpenseCategory::Personal], dec!(112));
    }

    // =========================================================================
    // children cost tests
    // =========================================================================

    #[test]
    fn children_cost_is_zero_without_children() {
        let outflows = aggregate(
            Lifestyle::Luxury,
            None,
            &partnered(0),
            &scaled_location(dec!(1.5)),
        )
        .unwrap();

        assert_eq!(outflows.children, dec!(0));
    }

    #[test]
    fn children_cost_scales_per_child_before_headcount() {
        // Luxury per child: 3900 × 1.5 = 5850; two children = 11700.
        let outflows = aggregate(
            Lifestyle::Luxury,
            None,
            &partnered(2),
            &scaled_location(dec!(1.5)),
        )
        .unwrap();

        assert_eq!(outflows.children, dec!(11700));
    }

    #[test]
    fn children_cost_uses_modest_rate_for_custom_budgets() {
        let budget = BTreeMap::new();

        let outflows = aggregate(
            Lifestyle::Custom,
            Some(&budget),
            &partnered(1),
            &baseline_location(),
        )
        .unwrap();

        assert_eq!(outflows.children, dec!(1200));
    }

    #[test]
    fn total_adds_children_to_category_sum() {
        let outflows = aggregate(
            Lifestyle::Modest,
            None,
            &FamilyStatus {
                relationship: Relationship::Single,
                num_children: 1,
                partner_income: dec!(0),
            },
            &baseline_location(),
        )
        .unwrap();

        assert_eq!(outflows.total, dec!(4150) + dec!(1200));
    }
}
