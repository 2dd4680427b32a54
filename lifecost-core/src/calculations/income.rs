//! End-to-end income planning.
//!
//! Composes the outflow aggregator and the required-income solver: first
//! the lifestyle is priced at the location, then the solver finds the
//! gross income whose take-home funds that spending. The resulting
//! [`IncomePlan`] carries the rounded income figures alongside the
//! adjusted budget that produced them.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use lifecost_core::calculations::income::IncomePlanner;
//! use lifecost_core::calculations::solver::{RequiredIncomeSolver, SolverConfig};
//! use lifecost_core::calculations::taxes::{PayrollTaxConfig, TaxCalculator};
//! use lifecost_core::models::{FamilyStatus, Lifestyle, Location};
//!
//! let planner = IncomePlanner::new(RequiredIncomeSolver::new(
//!     TaxCalculator::new(PayrollTaxConfig::default()),
//!     SolverConfig::default(),
//! ));
//!
//! let location = Location {
//!     city: "Austin".to_string(),
//!     state: "TX".to_string(),
//!     country: "United States".to_string(),
//!     cost_multiplier: dec!(1.0),
//!     is_custom: false,
//! };
//!
//! let plan = planner
//!     .plan(Lifestyle::Modest, None, &FamilyStatus::default(), &location)
//!     .unwrap();
//!
//! assert_eq!(plan.monthly_expenses, dec!(4150));
//! assert!(plan.yearly_income > dec!(49800));
//! assert!(plan.converged);
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::round_to_dollar;
use crate::calculations::outflows::{aggregate, OutflowError};
use crate::calculations::solver::{RequiredIncomeSolver, SolverError};
use crate::models::{ExpenseCategory, FamilyStatus, Lifestyle, Location};

/// Errors that can occur while building an income plan.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IncomePlanError {
    /// The outflow aggregation failed.
    #[error(transparent)]
    Outflow(#[from] OutflowError),

    /// The income search failed.
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// A complete answer: what the lifestyle costs and what it takes to earn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomePlan {
    /// Required gross income per month, whole dollars.
    pub monthly_income: Decimal,

    /// Required gross income per year, whole dollars.
    pub yearly_income: Decimal,

    /// Total monthly spending being funded, whole dollars.
    pub monthly_expenses: Decimal,

    /// The children's share of the monthly spending.
    pub children_expenses: Decimal,

    /// Per-category spending after family and location adjustments.
    pub adjusted_outflows: BTreeMap<ExpenseCategory, Decimal>,

    /// Whether the income search converged within tolerance.
    pub converged: bool,
}

/// Prices a lifestyle and solves for the income that sustains it.
#[derive(Debug, Clone)]
pub struct IncomePlanner {
    solver: RequiredIncomeSolver,
}

impl IncomePlanner {
    /// Creates a new planner around a solver.
    pub fn new(solver: RequiredIncomeSolver) -> Self {
        Self { solver }
    }

    /// Builds the full plan for a household.
    ///
    /// The solver targets the aggregated monthly total. The partner's
    /// income shifts the household's tax picture but never the spending
    /// side; both incomes are assumed to fund the same budget.
    ///
    /// # Errors
    ///
    /// Returns [`IncomePlanError`] if aggregation rejects the inputs or
    /// the income search fails.
    pub fn plan(
        &self,
        lifestyle: Lifestyle,
        custom_expenses: Option<&BTreeMap<ExpenseCategory, Decimal>>,
        family: &FamilyStatus,
        location: &Location,
    ) -> Result<IncomePlan, IncomePlanError> {
        let outflows = aggregate(lifestyle, custom_expenses, family, location)?;

        let outcome = self.solver.solve(
            outflows.total,
            &location.state,
            family.is_partnered(),
            family.partner_income,
        )?;

        let yearly_income = round_to_dollar(outcome.required_annual_income);
        let monthly_income = round_to_dollar(yearly_income / dec!(12));

        Ok(IncomePlan {
            monthly_income,
            yearly_income,
            monthly_expenses: outflows.total,
            children_expenses: outflows.children,
            adjusted_outflows: outflows.by_category,
            converged: outcome.converged,
        })
    }
}
