//! Combined federal, state, city and payroll tax estimation.
//!
//! Produces a [`TaxBreakdown`] for a gross annual income. The components
//! are deliberately approximate everywhere except the federal walk:
//!
//! | Component | Basis |
//! |-----------|-------|
//! | Federal | marginal walk over the bracket table, on combined household income |
//! | State | flat top-rate approximation with a regional fallback |
//! | City | table rate for known cities, assumed 1% in city-tax-prone states |
//! | Social security | 6.2% of individual income up to the wage base |
//! | Medicare | 1.45% of individual income plus a 0.9% surtax above the household threshold |
//!
//! When both partners earn, federal tax is computed on the combined income
//! and prorated back to this earner's share, rounded to whole dollars.
//! Payroll taxes always apply to the individual income alone.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use lifecost_core::calculations::taxes::{PayrollTaxConfig, TaxCalculator, TaxInput};
//!
//! let calculator = TaxCalculator::new(PayrollTaxConfig::default());
//!
//! let breakdown = calculator.estimate(&TaxInput {
//!     annual_income: dec!(100000.00),
//!     state: "TX".to_string(),
//!     city: None,
//!     married: false,
//!     partner_income: dec!(0.00),
//! }).unwrap();
//!
//! assert_eq!(breakdown.federal_tax, dec!(17053.00));
//! assert_eq!(breakdown.social_security, dec!(6200.00));
//! assert_eq!(breakdown.medicare, dec!(1450.00));
//! assert_eq!(breakdown.take_home_pay, dec!(75297.00));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{max, min, round_to_dollar};
use crate::models::{TaxBracket, TaxBreakdown};
use crate::tables::{city_rate, federal_brackets, state_rate};

/// Errors that can occur during tax estimation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxCalculatorError {
    /// The annual income must be non-negative.
    #[error("annual income must be non-negative, got {0}")]
    NegativeAnnualIncome(Decimal),

    /// The partner income must be non-negative.
    #[error("partner income must be non-negative, got {0}")]
    NegativePartnerIncome(Decimal),

    /// The social security rate must be between 0 and 1.
    #[error("social security rate must be between 0 and 1, got {0}")]
    InvalidSocialSecurityRate(Decimal),

    /// The Medicare rate must be between 0 and 1.
    #[error("medicare rate must be between 0 and 1, got {0}")]
    InvalidMedicareRate(Decimal),

    /// The Medicare surtax rate must be between 0 and 1.
    #[error("medicare surtax rate must be between 0 and 1, got {0}")]
    InvalidMedicareSurtaxRate(Decimal),

    /// The social security wage base must be positive.
    #[error("social security wage base must be positive, got {0}")]
    InvalidSsWageBase(Decimal),

    /// A Medicare surtax threshold must be positive.
    #[error("medicare surtax threshold must be positive, got {0}")]
    InvalidSurtaxThreshold(Decimal),
}

/// FICA parameters for the tax year.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use lifecost_core::calculations::taxes::PayrollTaxConfig;
///
/// let config = PayrollTaxConfig::default();
///
/// assert_eq!(config.ss_wage_base, dec!(168600.00));
/// assert_eq!(config.ss_rate, dec!(0.062));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTaxConfig {
    /// Maximum earnings subject to social security tax.
    ///
    /// For 2024, this is $168,600.
    pub ss_wage_base: Decimal,

    /// Employee share of the social security tax, typically 6.2%.
    pub ss_rate: Decimal,

    /// Employee share of the Medicare tax, typically 1.45%.
    pub medicare_rate: Decimal,

    /// Additional Medicare tax above the household threshold, typically 0.9%.
    pub medicare_surtax_rate: Decimal,

    /// Household income where the surtax starts for single filers.
    ///
    /// For 2024, this is $200,000.
    pub surtax_threshold_single: Decimal,

    /// Household income where the surtax starts for married filers.
    ///
    /// For 2024, this is $250,000.
    pub surtax_threshold_married: Decimal,
}

impl Default for PayrollTaxConfig {
    /// 2024 parameters.
    fn default() -> Self {
        Self {
            ss_wage_base: dec!(168600.00),
            ss_rate: dec!(0.062),
            medicare_rate: dec!(0.0145),
            medicare_surtax_rate: dec!(0.009),
            surtax_threshold_single: dec!(200000.00),
            surtax_threshold_married: dec!(250000.00),
        }
    }
}

impl PayrollTaxConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`TaxCalculatorError`] if:
    /// - `ss_rate`, `medicare_rate` or `medicare_surtax_rate` is not in [0, 1]
    /// - `ss_wage_base` is not positive
    /// - either surtax threshold is not positive
    pub fn validate(&self) -> Result<(), TaxCalculatorError> {
        if self.ss_rate < Decimal::ZERO || self.ss_rate > Decimal::ONE {
            return Err(TaxCalculatorError::InvalidSocialSecurityRate(self.ss_rate));
        }
        if self.medicare_rate < Decimal::ZERO || self.medicare_rate > Decimal::ONE {
            return Err(TaxCalculatorError::InvalidMedicareRate(self.medicare_rate));
        }
        if self.medicare_surtax_rate < Decimal::ZERO || self.medicare_surtax_rate > Decimal::ONE {
            return Err(TaxCalculatorError::InvalidMedicareSurtaxRate(
                self.medicare_surtax_rate,
            ));
        }
        if self.ss_wage_base <= Decimal::ZERO {
            return Err(TaxCalculatorError::InvalidSsWageBase(self.ss_wage_base));
        }
        if self.surtax_threshold_single <= Decimal::ZERO {
            return Err(TaxCalculatorError::InvalidSurtaxThreshold(
                self.surtax_threshold_single,
            ));
        }
        if self.surtax_threshold_married <= Decimal::ZERO {
            return Err(TaxCalculatorError::InvalidSurtaxThreshold(
                self.surtax_threshold_married,
            ));
        }
        Ok(())
    }
}

/// One earner's situation for a tax estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    /// Gross annual income of the earner being estimated.
    pub annual_income: Decimal,

    /// Two-letter state code, case-insensitive.
    pub state: String,

    /// City name as spelled in the municipal table; `None` for no city tax.
    pub city: Option<String>,

    /// Whether the household files as married. Selects the bracket table
    /// and surtax threshold and brings `partner_income` into play.
    pub married: bool,

    /// The partner's gross annual income. Ignored unless `married`.
    pub partner_income: Decimal,
}

/// Calculator producing [`TaxBreakdown`] values.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use lifecost_core::calculations::taxes::{PayrollTaxConfig, TaxCalculator, TaxInput};
///
/// let calculator = TaxCalculator::new(PayrollTaxConfig::default());
///
/// let breakdown = calculator.estimate(&TaxInput {
///     annual_income: dec!(0.00),
///     state: "CA".to_string(),
///     city: None,
///     married: false,
///     partner_income: dec!(0.00),
/// }).unwrap();
///
/// // Zero income never divides by zero.
/// assert_eq!(breakdown.effective_rate, dec!(0));
/// ```
#[derive(Debug, Clone)]
pub struct TaxCalculator {
    payroll: PayrollTaxConfig,
}

impl TaxCalculator {
    /// Creates a new calculator with the given payroll parameters.
    pub fn new(payroll: PayrollTaxConfig) -> Self {
        Self { payroll }
    }

    /// Estimates all tax components for one earner.
    ///
    /// # Arguments
    ///
    /// * `input` - The earner's income, location and household situation
    ///
    /// # Returns
    ///
    /// Returns [`TaxBreakdown`] with every component, the effective and
    /// marginal rates, and annual/monthly take-home pay. At zero income
    /// every component and the effective rate are zero.
    ///
    /// # Errors
    ///
    /// Returns [`TaxCalculatorError`] if the payroll configuration is
    /// invalid or either income is negative.
    pub fn estimate(&self, input: &TaxInput) -> Result<TaxBreakdown, TaxCalculatorError> {
        self.payroll.validate()?;

        if input.annual_income < Decimal::ZERO {
            return Err(TaxCalculatorError::NegativeAnnualIncome(input.annual_income));
        }
        if input.partner_income < Decimal::ZERO {
            return Err(TaxCalculatorError::NegativePartnerIncome(
                input.partner_income,
            ));
        }

        let combined_income = if input.married {
            input.annual_income + input.partner_income
        } else {
            input.annual_income
        };

        let brackets = federal_brackets(input.married);
        let federal_tax = self.federal_tax(input, brackets, combined_income);

        let state_rate = state_rate(&input.state);
        let state_tax = input.annual_income * state_rate;

        let city_rate = city_rate(input.city.as_deref(), &input.state);
        let city_tax = input.annual_income * city_rate;

        let social_security = self.social_security_tax(input.annual_income);
        let medicare = self.medicare_tax(input, combined_income);

        let total_tax = federal_tax + state_tax + city_tax + social_security + medicare;
        let effective_rate = if input.annual_income.is_zero() {
            Decimal::ZERO
        } else {
            total_tax / input.annual_income
        };
        let marginal_rate =
            federal_marginal_rate(brackets, combined_income) + state_rate + city_rate;

        let take_home_pay = input.annual_income - total_tax;
        let monthly_take_home = take_home_pay / dec!(12);

        Ok(TaxBreakdown {
            federal_tax,
            state_tax,
            city_tax,
            social_security,
            medicare,
            total_tax,
            effective_rate,
            marginal_rate,
            take_home_pay,
            monthly_take_home,
        })
    }

    /// Federal tax attributable to this earner.
    ///
    /// The walk runs over the combined household income. When both
    /// partners earn, the combined tax is prorated by this earner's share
    /// and rounded to whole dollars; a sole earner keeps the walked
    /// amount unrounded.
    fn federal_tax(
        &self,
        input: &TaxInput,
        brackets: &[TaxBracket],
        combined_income: Decimal,
    ) -> Decimal {
        let combined_tax = bracket_tax(brackets, combined_income);

        if input.married && input.partner_income > Decimal::ZERO {
            // combined_income >= partner_income > 0, so the share is well defined.
            round_to_dollar(combined_tax * input.annual_income / combined_income)
        } else {
            combined_tax
        }
    }

    /// Social security tax on individual income, capped at the wage base.
    fn social_security_tax(&self, annual_income: Decimal) -> Decimal {
        min(annual_income, self.payroll.ss_wage_base) * self.payroll.ss_rate
    }

    /// Medicare tax on individual income.
    ///
    /// The 0.9% surtax starts once combined household income crosses the
    /// filing threshold; the partner's income eats into the threshold
    /// before this earner's surtaxable share is measured.
    fn medicare_tax(
        &self,
        input: &TaxInput,
        combined_income: Decimal,
    ) -> Decimal {
        let base = input.annual_income * self.payroll.medicare_rate;

        let threshold = if input.married {
            self.payroll.surtax_threshold_married
        } else {
            self.payroll.surtax_threshold_single
        };
        if combined_income <= threshold {
            return base;
        }

        let partner_offset = if input.married {
            input.partner_income
        } else {
            Decimal::ZERO
        };
        let surtaxable = max(
            Decimal::ZERO,
            input.annual_income - (threshold - partner_offset),
        );

        base + surtaxable * self.payroll.medicare_surtax_rate
    }
}

/// Walks the bracket table, taxing each marginal slice at its rate.
fn bracket_tax(brackets: &[TaxBracket], income: Decimal) -> Decimal {
    let mut tax = Decimal::ZERO;
    for bracket in brackets {
        if income <= bracket.min_income {
            break;
        }
        let upper = match bracket.max_income {
            Some(max_income) => max_income.min(income),
            None => income,
        };
        tax += (upper - bracket.min_income) * bracket.rate;
    }
    tax
}

/// Rate of the highest bracket the income reaches into, zero at or
/// below the first bracket floor.
fn federal_marginal_rate(brackets: &[TaxBracket], income: Decimal) -> Decimal {
    brackets
        .iter()
        .rev()
        .find(|bracket| income > bracket.min_income)
        .map(|bracket| bracket.rate)
        .unwrap_or(Decimal::ZERO)
}
