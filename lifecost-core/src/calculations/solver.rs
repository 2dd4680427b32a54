//! Required gross income search.
//!
//! Take-home pay is monotonic in gross income but the tax function is
//! piecewise (brackets, wage caps, surtax thresholds), so there is no
//! closed-form inverse. The solver bisects over the band
//! [desired annual net, 2 × desired annual net] until annual take-home
//! lands within the tolerance of the target.
//!
//! A search that exhausts its iterations reports `converged = false` and
//! returns the lower bound as the best approximation; this happens when
//! the combined effective tax rate exceeds 50% and the band cannot
//! contain the answer.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use lifecost_core::calculations::solver::{RequiredIncomeSolver, SolverConfig};
//! use lifecost_core::calculations::taxes::{PayrollTaxConfig, TaxCalculator};
//!
//! let calculator = TaxCalculator::new(PayrollTaxConfig::default());
//! let solver = RequiredIncomeSolver::new(calculator, SolverConfig::default());
//!
//! let outcome = solver.solve(dec!(4000.00), "TX", false, dec!(0.00)).unwrap();
//!
//! assert!(outcome.converged);
//! assert!(outcome.required_annual_income > dec!(48000.00));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::taxes::{TaxCalculator, TaxCalculatorError, TaxInput};

/// Errors that can occur while solving for required income.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    /// The iteration budget must be at least 1.
    #[error("max iterations must be at least 1, got {0}")]
    InvalidMaxIterations(u32),

    /// The tolerance must be positive.
    #[error("tolerance must be positive, got {0}")]
    InvalidTolerance(Decimal),

    /// The desired monthly net must be non-negative.
    #[error("desired monthly net must be non-negative, got {0}")]
    NegativeTargetNet(Decimal),

    /// The underlying tax estimate failed.
    #[error(transparent)]
    Calculator(#[from] TaxCalculatorError),
}

/// Bisection parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum bisection steps before giving up.
    pub max_iterations: u32,

    /// Acceptable gap, in dollars, between annual take-home and the
    /// annualized target.
    pub tolerance: Decimal,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 20,
            tolerance: dec!(1000.00),
        }
    }
}

impl SolverConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] if the iteration budget is zero or the
    /// tolerance is not positive.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidMaxIterations(self.max_iterations));
        }
        if self.tolerance <= Decimal::ZERO {
            return Err(SolverError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

/// Result of a bisection search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveOutcome {
    /// Gross annual income whose take-home funds the target, or the best
    /// approximation when the search did not converge.
    pub required_annual_income: Decimal,

    /// Bisection steps performed, including the converging one.
    pub iterations: u32,

    /// Whether the take-home gap came within tolerance.
    pub converged: bool,
}

/// Searches for the gross income that nets a desired monthly amount.
#[derive(Debug, Clone)]
pub struct RequiredIncomeSolver {
    calculator: TaxCalculator,
    config: SolverConfig,
}

impl RequiredIncomeSolver {
    /// Creates a new solver around a calculator.
    pub fn new(calculator: TaxCalculator, config: SolverConfig) -> Self {
        Self { calculator, config }
    }

    /// Finds the gross annual income whose take-home pay covers
    /// `desired_monthly_net` every month.
    ///
    /// City taxes are deliberately left out of the search: the target is
    /// a spending level, not a place-specific paycheck.
    ///
    /// # Arguments
    ///
    /// * `desired_monthly_net` - Net dollars needed per month
    /// * `state` - Two-letter state code for the tax estimates
    /// * `married` - Whether the household files as married
    /// * `partner_income` - The partner's gross annual income
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] if the configuration is invalid, the
    /// target is negative, or a tax estimate fails.
    pub fn solve(
        &self,
        desired_monthly_net: Decimal,
        state: &str,
        married: bool,
        partner_income: Decimal,
    ) -> Result<SolveOutcome, SolverError> {
        self.config.validate()?;
        if desired_monthly_net < Decimal::ZERO {
            return Err(SolverError::NegativeTargetNet(desired_monthly_net));
        }

        let desired_annual_net = desired_monthly_net * dec!(12);
        let mut low = desired_annual_net;
        let mut high = desired_annual_net * dec!(2);
        let mut iterations = 0;

        while iterations < self.config.max_iterations {
            let midpoint = (low + high) / dec!(2);
            let take_home = self.take_home(midpoint, state, married, partner_income)?;
            let diff = take_home - desired_annual_net;

            if diff.abs() < self.config.tolerance {
                return Ok(SolveOutcome {
                    required_annual_income: midpoint,
                    iterations: iterations + 1,
                    converged: true,
                });
            }

            if diff < Decimal::ZERO {
                low = midpoint;
            } else {
                high = midpoint;
            }
            iterations += 1;
        }

        warn!(
            desired_monthly_net = %desired_monthly_net,
            state,
            iterations,
            lower_bound = %low,
            "bisection exhausted its iterations; returning the lower bound"
        );
        Ok(SolveOutcome {
            required_annual_income: low,
            iterations,
            converged: false,
        })
    }

    /// Annual take-home pay at a candidate gross income.
    fn take_home(
        &self,
        annual_income: Decimal,
        state: &str,
        married: bool,
        partner_income: Decimal,
    ) -> Result<Decimal, TaxCalculatorError> {
        let breakdown = self.calculator.estimate(&TaxInput {
            annual_income,
            state: state.to_string(),
            city: None,
            married,
            partner_income,
        })?;
        Ok(breakdown.take_home_pay)
    }
}
