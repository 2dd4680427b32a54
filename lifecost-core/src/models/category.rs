use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Suggested monthly range for a spending category, used by input surfaces
/// to seed sliders and validate custom amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingRange {
    pub min: Decimal,
    pub max: Decimal,
    pub default: Decimal,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Housing,
    Transportation,
    Food,
    Utilities,
    Healthcare,
    Insurance,
    Savings,
    Investments,
    Entertainment,
    Personal,
    Education,
    Other,
    Children,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Housing => "housing",
            Self::Transportation => "transportation",
            Self::Food => "food",
            Self::Utilities => "utilities",
            Self::Healthcare => "healthcare",
            Self::Insurance => "insurance",
            Self::Savings => "savings",
            Self::Investments => "investments",
            Self::Entertainment => "entertainment",
            Self::Personal => "personal",
            Self::Education => "education",
            Self::Other => "other",
            Self::Children => "children",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "housing" => Some(Self::Housing),
            "transportation" => Some(Self::Transportation),
            "food" => Some(Self::Food),
            "utilities" => Some(Self::Utilities),
            "healthcare" => Some(Self::Healthcare),
            "insurance" => Some(Self::Insurance),
            "savings" => Some(Self::Savings),
            "investments" => Some(Self::Investments),
            "entertainment" => Some(Self::Entertainment),
            "personal" => Some(Self::Personal),
            "education" => Some(Self::Education),
            "other" => Some(Self::Other),
            "children" => Some(Self::Children),
            _ => None,
        }
    }

    /// Every category, including `Children`.
    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::Housing,
            Self::Transportation,
            Self::Food,
            Self::Utilities,
            Self::Healthcare,
            Self::Insurance,
            Self::Savings,
            Self::Investments,
            Self::Entertainment,
            Self::Personal,
            Self::Education,
            Self::Other,
            Self::Children,
        ]
    }

    /// The categories that carry a monthly amount in an outflow map.
    ///
    /// `Children` is excluded: child costs are derived from the lifestyle
    /// tier and headcount, never entered per month.
    pub fn spending() -> &'static [ExpenseCategory] {
        &[
            Self::Housing,
            Self::Transportation,
            Self::Food,
            Self::Utilities,
            Self::Healthcare,
            Self::Insurance,
            Self::Savings,
            Self::Investments,
            Self::Entertainment,
            Self::Personal,
            Self::Education,
            Self::Other,
        ]
    }

    /// Ratio applied to this category when the household has two adults.
    ///
    /// Models shared versus duplicated costs: housing is shared outright,
    /// healthcare doubles, food lands in between.
    pub fn partner_multiplier(&self) -> Decimal {
        match self {
            Self::Housing => dec!(1.0),
            Self::Transportation => dec!(1.5),
            Self::Food => dec!(1.8),
            Self::Utilities => dec!(1.2),
            Self::Healthcare => dec!(2.0),
            Self::Insurance => dec!(2.0),
            Self::Savings => dec!(1.0),
            Self::Investments => dec!(1.0),
            Self::Entertainment => dec!(1.7),
            Self::Personal => dec!(2.0),
            Self::Education => dec!(1.0),
            Self::Other => dec!(1.5),
            Self::Children => dec!(1.0),
        }
    }

    /// Whether the location cost-of-living multiplier applies.
    ///
    /// Savings and investment targets are goals rather than local prices,
    /// so they stay location-invariant.
    pub fn location_sensitive(&self) -> bool {
        !matches!(self, Self::Savings | Self::Investments)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Housing => "Rent, mortgage, property taxes, home insurance, maintenance",
            Self::Transportation => "Car payments, gas, public transit, maintenance, parking",
            Self::Food => "Groceries, dining out, snacks, beverages",
            Self::Utilities => "Electricity, water, gas, internet, phone",
            Self::Healthcare => "Health insurance, medications, doctor visits",
            Self::Insurance => "Life insurance, disability insurance",
            Self::Savings => "Emergency fund, general savings",
            Self::Investments => "Retirement accounts, stocks, bonds",
            Self::Entertainment => "Movies, hobbies, subscriptions, travel",
            Self::Personal => "Clothing, personal care, gym",
            Self::Education => "Tuition, books, courses, professional development",
            Self::Other => "Miscellaneous expenses",
            Self::Children => "Child-related expenses including education savings",
        }
    }

    /// Suggested monthly range, `None` for `Children` (not user-entered).
    pub fn suggested_range(&self) -> Option<SpendingRange> {
        let range = |min, max, default| Some(SpendingRange { min, max, default });
        match self {
            Self::Housing => range(dec!(1500), dec!(15000), dec!(3000)),
            Self::Transportation => range(dec!(300), dec!(1500), dec!(600)),
            Self::Food => range(dec!(400), dec!(2000), dec!(800)),
            Self::Utilities => range(dec!(200), dec!(800), dec!(400)),
            Self::Healthcare => range(dec!(300), dec!(1200), dec!(600)),
            Self::Insurance => range(dec!(100), dec!(500), dec!(250)),
            Self::Entertainment => range(dec!(200), dec!(3000), dec!(500)),
            Self::Personal => range(dec!(100), dec!(1000), dec!(300)),
            Self::Education => range(dec!(50), dec!(1000), dec!(200)),
            Self::Other => range(dec!(100), dec!(1000), dec!(300)),
            Self::Savings => range(dec!(500), dec!(5000), dec!(1000)),
            Self::Investments => range(dec!(300), dec!(5000), dec!(800)),
            Self::Children => None,
        }
    }
}
