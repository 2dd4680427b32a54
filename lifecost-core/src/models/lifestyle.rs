use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::ExpenseCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifestyle {
    Modest,
    Comfortable,
    Luxury,
    Custom,
}

impl Lifestyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modest => "modest",
            Self::Comfortable => "comfortable",
            Self::Luxury => "luxury",
            Self::Custom => "custom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "modest" => Some(Self::Modest),
            "comfortable" => Some(Self::Comfortable),
            "luxury" => Some(Self::Luxury),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    pub fn all() -> &'static [Lifestyle] {
        &[
            Lifestyle::Modest,
            Lifestyle::Comfortable,
            Lifestyle::Luxury,
            Lifestyle::Custom,
        ]
    }

    /// Default monthly amount for a spending category at this tier.
    ///
    /// `Custom` falls back to the modest table; `Children` is always zero
    /// here because child costs are derived separately from
    /// [`Lifestyle::base_child_cost`].
    pub fn default_monthly_outflow(&self, category: ExpenseCategory) -> Decimal {
        use ExpenseCategory::*;
        match self {
            Self::Custom => Self::Modest.default_monthly_outflow(category),
            Self::Modest => match category {
                Housing => dec!(1500),
                Transportation => dec!(400),
                Food => dec!(400),
                Utilities => dec!(200),
                Healthcare => dec!(300),
                Insurance => dec!(100),
                Savings => dec!(500),
                Investments => dec!(300),
                Entertainment => dec!(200),
                Personal => dec!(100),
                Education => dec!(50),
                Other => dec!(100),
                Children => Decimal::ZERO,
            },
            Self::Comfortable => match category {
                Housing => dec!(2500),
                Transportation => dec!(600),
                Food => dec!(800),
                Utilities => dec!(300),
                Healthcare => dec!(400),
                Insurance => dec!(200),
                Savings => dec!(1000),
                Investments => dec!(800),
                Entertainment => dec!(500),
                Personal => dec!(300),
                Education => dec!(200),
                Other => dec!(200),
                Children => Decimal::ZERO,
            },
            Self::Luxury => match category {
                Housing => dec!(5000),
                Transportation => dec!(1200),
                Food => dec!(1500),
                Utilities => dec!(500),
                Healthcare => dec!(600),
                Insurance => dec!(400),
                Savings => dec!(2000),
                Investments => dec!(2000),
                Entertainment => dec!(1000),
                Personal => dec!(800),
                Education => dec!(500),
                Other => dec!(500),
                Children => Decimal::ZERO,
            },
        }
    }

    /// The full default outflow map for this tier, covering every spending
    /// category (children excluded).
    pub fn default_outflows(&self) -> BTreeMap<ExpenseCategory, Decimal> {
        ExpenseCategory::spending()
            .iter()
            .map(|&category| (category, self.default_monthly_outflow(category)))
            .collect()
    }

    /// Base monthly cost per child at this tier, before location adjustment.
    ///
    /// Covers food, clothing, healthcare, activities, education savings and
    /// childcare. `Custom` falls back to the modest figure.
    pub fn base_child_cost(&self) -> Decimal {
        match self {
            Self::Modest | Self::Custom => dec!(1200),
            Self::Comfortable => dec!(2000),
            Self::Luxury => dec!(3900),
        }
    }
}
