//! Value parsers for command-line arguments.

use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use lifecost_core::models::{ExpenseCategory, Lifestyle, Location};

/// Error returned when a command-line value cannot be interpreted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("location must look like 'City, ST', got '{0}'")]
    InvalidLocation(String),

    #[error("unknown lifestyle '{0}', expected one of: modest, comfortable, luxury, custom")]
    UnknownLifestyle(String),

    #[error("expense must look like 'category=amount', got '{0}'")]
    InvalidExpense(String),

    #[error("unknown expense category '{0}'")]
    UnknownCategory(String),
}

static LOCATION_RE: OnceLock<Regex> = OnceLock::new();

fn location_re() -> &'static Regex {
    LOCATION_RE.get_or_init(|| {
        Regex::new(r"^(?P<city>[^,]+?)\s*,\s*(?P<state>[A-Za-z]{2})$")
            .expect("Invalid regex pattern")
    })
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a money argument into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
/// Returns an error and logs when the input is invalid (non-empty but not parseable).
pub fn parse_decimal_arg(s: &str) -> Result<Decimal, ArgError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ArgError::InvalidAmount(s.to_string())
    })
}

/// Splits a free-form `"City, ST"` argument into a custom [`Location`].
///
/// Any spacing around the comma is accepted and the state code is
/// uppercased. The city keeps the spelling it was given. The multiplier
/// comes from a separate argument, so the caller passes it in.
pub fn parse_location_arg(s: &str, cost_multiplier: Decimal) -> Result<Location, ArgError> {
    let captures = location_re()
        .captures(s.trim())
        .ok_or_else(|| ArgError::InvalidLocation(s.to_string()))?;

    Ok(Location {
        city: captures["city"].to_string(),
        state: captures["state"].to_uppercase(),
        country: "United States".to_string(),
        cost_multiplier,
        is_custom: true,
    })
}

/// Parses a lifestyle tier name, case-insensitively.
pub fn parse_lifestyle_arg(s: &str) -> Result<Lifestyle, ArgError> {
    Lifestyle::parse(&s.trim().to_lowercase())
        .ok_or_else(|| ArgError::UnknownLifestyle(s.to_string()))
}

/// Parses one `category=amount` pair for a custom budget.
pub fn parse_expense_arg(s: &str) -> Result<(ExpenseCategory, Decimal), ArgError> {
    let (category, amount) = s
        .split_once('=')
        .ok_or_else(|| ArgError::InvalidExpense(s.to_string()))?;

    let category = ExpenseCategory::parse(&category.trim().to_lowercase())
        .ok_or_else(|| ArgError::UnknownCategory(category.trim().to_string()))?;

    Ok((category, parse_decimal_arg(amount)?))
}
