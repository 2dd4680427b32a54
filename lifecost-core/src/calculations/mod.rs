//! Calculation pipeline for lifestyle costs and required income.
//!
//! The modules here are layered: `outflows` turns a lifestyle choice into a
//! monthly budget, `taxes` estimates the tax burden on a given income, and
//! `solver` inverts the tax estimate to find the gross income that nets a
//! target amount.  `income` ties the three together into a single plan.

pub mod common;
pub mod income;
pub mod outflows;
pub mod solver;
pub mod taxes;

pub use income::{IncomePlan, IncomePlanError, IncomePlanner};
pub use outflows::{MonthlyOutflows, OutflowError};
pub use solver::{RequiredIncomeSolver, SolveOutcome, SolverConfig, SolverError};
pub use taxes::{PayrollTaxConfig, TaxCalculator, TaxCalculatorError, TaxInput};
