mod category;
mod family;
mod lifestyle;
mod location;
mod scenario;
mod tax;

pub use category::{ExpenseCategory, SpendingRange};
pub use family::{FamilyStatus, Relationship};
pub use lifestyle::Lifestyle;
pub use location::{Location, LocationError, LocationPreset};
pub use scenario::{
    combined_annual_income, combined_monthly_income, default_scenario_name, IncomeComparison,
    NewScenario, Scenario,
};
pub use tax::{TaxBracket, TaxBreakdown};
