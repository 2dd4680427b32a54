//! Plan-building wizard state.
//!
//! The wizard walks four steps: lifestyle, location, family, summary.
//! State is immutable; every action produces the next state, so callers
//! can keep history or discard it. Consistency rules live in the
//! transitions themselves: choosing a preset lifestyle drops any custom
//! budget, supplying a custom budget forces the custom lifestyle, and a
//! single household can never carry partner income.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    ExpenseCategory, FamilyStatus, Lifestyle, Location, LocationError, NewScenario,
};
use crate::tables::default_preset;

/// First wizard step (lifestyle selection).
pub const FIRST_STEP: u8 = 1;
/// Last wizard step (summary).
pub const LAST_STEP: u8 = 4;

/// Errors reported by [`WizardState::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    /// The step is outside the wizard's range.
    #[error("wizard step must be between {FIRST_STEP} and {LAST_STEP}, got {0}")]
    StepOutOfRange(u8),

    /// The chosen location failed validation.
    #[error(transparent)]
    InvalidLocation(#[from] LocationError),
}

/// State transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Jump to a step as-is; stepping helpers clamp, this does not.
    SetStep(u8),
    SetLifestyle(Lifestyle),
    SetCustomExpenses(BTreeMap<ExpenseCategory, Decimal>),
    SetFamily(FamilyStatus),
    SetLocation(Location),
    Reset,
}

/// Everything the wizard has collected so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: u8,
    pub lifestyle: Lifestyle,
    pub location: Location,
    pub family: FamilyStatus,
    pub custom_expenses: Option<BTreeMap<ExpenseCategory, Decimal>>,
}

impl Default for WizardState {
    /// A fresh wizard: first step, modest lifestyle, the default preset
    /// location, single with no children.
    fn default() -> Self {
        Self {
            step: FIRST_STEP,
            lifestyle: Lifestyle::Modest,
            location: default_preset().to_location(),
            family: FamilyStatus::default(),
            custom_expenses: None,
        }
    }
}

impl WizardState {
    /// Applies one action and returns the next state.
    pub fn apply(self, action: WizardAction) -> WizardState {
        match action {
            WizardAction::SetStep(step) => WizardState { step, ..self },
            WizardAction::SetLifestyle(lifestyle) => {
                let custom_expenses = if lifestyle == Lifestyle::Custom {
                    self.custom_expenses
                } else {
                    None
                };
                WizardState {
                    lifestyle,
                    custom_expenses,
                    ..self
                }
            }
            WizardAction::SetCustomExpenses(custom_expenses) => WizardState {
                lifestyle: Lifestyle::Custom,
                custom_expenses: Some(custom_expenses),
                ..self
            },
            WizardAction::SetFamily(family) => WizardState {
                family: family.normalized(),
                ..self
            },
            WizardAction::SetLocation(location) => WizardState { location, ..self },
            WizardAction::Reset => WizardState::default(),
        }
    }

    /// Moves one step forward, stopping at the summary.
    pub fn advanced(self) -> WizardState {
        WizardState {
            step: self.step.saturating_add(1).min(LAST_STEP),
            ..self
        }
    }

    /// Moves one step back, stopping at the first step.
    pub fn retreated(self) -> WizardState {
        WizardState {
            step: self.step.saturating_sub(1).max(FIRST_STEP),
            ..self
        }
    }

    pub fn is_last_step(&self) -> bool {
        self.step == LAST_STEP
    }

    /// Checks the invariants a finished wizard must satisfy.
    pub fn validate(&self) -> Result<(), WizardError> {
        if !(FIRST_STEP..=LAST_STEP).contains(&self.step) {
            return Err(WizardError::StepOutOfRange(self.step));
        }
        self.location.validate()?;
        Ok(())
    }

    /// Produces a scenario draft from the collected choices.
    pub fn into_scenario(
        self,
        name: String,
        user_id: String,
        user_name: String,
        is_public: bool,
    ) -> NewScenario {
        NewScenario {
            name,
            user_id,
            user_name,
            is_public,
            lifestyle: self.lifestyle,
            location: self.location,
            family: self.family,
            custom_expenses: self.custom_expenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::Relationship;

    use super::*;

    fn custom_budget() -> BTreeMap<ExpenseCategory, Decimal> {
        let mut budget = BTreeMap::new();
        budget.insert(ExpenseCategory::Housing, dec!(2200));
        budget.insert(ExpenseCategory::Food, dec!(650));
        budget
    }

    // =========================================================================
    // default state tests
    // =========================================================================

    #[test]
    fn default_starts_at_the_first_step() {
        let state = WizardState::default();

        assert_eq!(state.step, FIRST_STEP);
        assert_eq!(state.lifestyle, Lifestyle::Modest);
        assert_eq!(state.custom_expenses, None);
    }

    #[test]
    fn default_location_is_the_first_preset() {
        let state = WizardState::default();

        assert_eq!(state.location.city, "New York City");
        assert_eq!(state.location.state, "NY");
        assert!(!state.location.is_custom);
    }

    #[test]
    fn default_family_is_single_without_children() {
        let state = WizardState::default();

        assert_eq!(state.family, FamilyStatus::default());
    }

    // =========================================================================
    // apply tests
    // =========================================================================

    #[test]
    fn set_step_stores_the_raw_value() {
        let state = WizardState::default().apply(WizardAction::SetStep(9));

        assert_eq!(state.step, 9);
    }

    #[test]
    fn set_lifestyle_clears_a_custom_budget() {
        let state = WizardState::default()
            .apply(WizardAction::SetCustomExpenses(custom_budget()))
            .apply(WizardAction::SetLifestyle(Lifestyle::Comfortable));

        assert_eq!(state.lifestyle, Lifestyle::Comfortable);
        assert_eq!(state.custom_expenses, None);
    }

    #[test]
    fn reselecting_custom_keeps_the_budget() {
        let state = WizardState::default()
            .apply(WizardAction::SetCustomExpenses(custom_budget()))
            .apply(WizardAction::SetLifestyle(Lifestyle::Custom));

        assert_eq!(state.custom_expenses, Some(custom_budget()));
    }

    #[test]
    fn set_custom_expenses_forces_the_custom_lifestyle() {
        let state = WizardState::default()
            .apply(WizardAction::SetLifestyle(Lifestyle::Luxury))
            .apply(WizardAction::SetCustomExpenses(custom_budget()));

        assert_eq!(state.lifestyle, Lifestyle::Custom);
        assert_eq!(state.custom_expenses, Some(custom_budget()));
    }

    #[test]
    fn set_family_normalizes_single_partner_income() {
        let family = FamilyStatus {
            relationship: Relationship::Single,
            num_children: 1,
            partner_income: dec!(50000),
        };

        let state = WizardState::default().apply(WizardAction::SetFamily(family));

        assert_eq!(state.family.partner_income, dec!(0));
        assert_eq!(state.family.num_children, 1);
    }

    #[test]
    fn set_family_keeps_partner_income_when_partnered() {
        let family = FamilyStatus {
            relationship: Relationship::Partnered,
            num_children: 0,
            partner_income: dec!(50000),
        };

        let state = WizardState::default().apply(WizardAction::SetFamily(family));

        assert_eq!(state.family.partner_income, dec!(50000));
    }

    #[test]
    fn reset_restores_the_default_state() {
        let state = WizardState::default()
            .apply(WizardAction::SetStep(3))
            .apply(WizardAction::SetCustomExpenses(custom_budget()))
            .apply(WizardAction::Reset);

        assert_eq!(state, WizardState::default());
    }

    // =========================================================================
    // stepping tests
    // =========================================================================

    #[test]
    fn advanced_moves_forward_one_step() {
        let state = WizardState::default().advanced();

        assert_eq!(state.step, 2);
    }

    #[test]
    fn advanced_stops_at_the_last_step() {
        let state = WizardState::default()
            .apply(WizardAction::SetStep(LAST_STEP))
            .advanced();

        assert_eq!(state.step, LAST_STEP);
    }

    #[test]
    fn retreated_stops_at_the_first_step() {
        let state = WizardState::default().retreated();

        assert_eq!(state.step, FIRST_STEP);
    }

    #[test]
    fn is_last_step_only_at_the_summary() {
        assert!(!WizardState::default().is_last_step());
        assert!(
            WizardState::default()
                .apply(WizardAction::SetStep(LAST_STEP))
                .is_last_step()
        );
    }

    // =========================================================================
    // validate tests
    // =========================================================================

    #[test]
    fn validate_accepts_the_default_state() {
        assert_eq!(WizardState::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_an_out_of_range_step() {
        let state = WizardState::default().apply(WizardAction::SetStep(9));

        assert_eq!(state.validate(), Err(WizardError::StepOutOfRange(9)));
    }

    #[test]
    fn validate_rejects_an_invalid_location() {
        let mut state = WizardState::default();
        state.location.cost_multiplier = dec!(0);

        assert!(matches!(
            state.validate(),
            Err(WizardError::InvalidLocation(_))
        ));
    }

    // =========================================================================
    // into_scenario tests
    // =========================================================================

    #[test]
    fn into_scenario_copies_the_collected_choices() {
        let state = WizardState::default()
            .apply(WizardAction::SetLifestyle(Lifestyle::Luxury))
            .apply(WizardAction::SetFamily(FamilyStatus {
                relationship: Relationship::Partnered,
                num_children: 2,
                partner_income: dec!(40000),
            }));

        let scenario = state.clone().into_scenario(
            "Big move".to_string(),
            "user-1".to_string(),
            "Sam".to_string(),
            true,
        );

        assert_eq!(scenario.name, "Big move");
        assert_eq!(scenario.user_id, "user-1");
        assert_eq!(scenario.user_name, "Sam");
        assert!(scenario.is_public);
        assert_eq!(scenario.lifestyle, Lifestyle::Luxury);
        assert_eq!(scenario.family, state.family);
        assert_eq!(scenario.location, state.location);
        assert_eq!(scenario.custom_expenses, None);
    }
}
