use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Single,
    Partnered,
}

impl Relationship {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Partnered => "partnered",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single" => Some(Self::Single),
            "partnered" => Some(Self::Partnered),
            _ => None,
        }
    }
}

/// Household composition.
///
/// `partner_income` is only meaningful when partnered; callers should pass
/// values through [`FamilyStatus::normalized`] so a single household never
/// carries a stale partner income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyStatus {
    pub relationship: Relationship,
    pub num_children: u32,
    pub partner_income: Decimal,
}

impl FamilyStatus {
    pub fn is_partnered(&self) -> bool {
        self.relationship == Relationship::Partnered
    }

    /// Forces partner income to zero for single households.
    pub fn normalized(mut self) -> Self {
        if self.relationship == Relationship::Single {
            self.partner_income = Decimal::ZERO;
        }
        self
    }
}

impl Default for FamilyStatus {
    fn default() -> Self {
        Self {
            relationship: Relationship::Single,
            num_children: 0,
            partner_income: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn relationship_round_trips_through_parse() {
        assert_eq!(Relationship::parse("single"), Some(Relationship::Single));
        assert_eq!(
            Relationship::parse("partnered"),
            Some(Relationship::Partnered)
        );
        assert_eq!(Relationship::parse("married"), None);
    }

    #[test]
    fn default_family_is_single_with_no_children() {
        let family = FamilyStatus::default();

        assert_eq!(family.relationship, Relationship::Single);
        assert_eq!(family.num_children, 0);
        assert_eq!(family.partner_income, Decimal::ZERO);
    }

    #[test]
    fn normalized_zeroes_partner_income_when_single() {
        let family = FamilyStatus {
            relationship: Relationship::Single,
            num_children: 1,
            partner_income: dec!(85000),
        };

        let normalized = family.normalized();

        assert_eq!(normalized.partner_income, Decimal::ZERO);
        assert_eq!(normalized.num_children, 1);
    }

    #[test]
    fn normalized_keeps_partner_income_when_partnered() {
        let family = FamilyStatus {
            relationship: Relationship::Partnered,
            num_children: 0,
            partner_income: dec!(85000),
        };

        let normalized = family.clone().normalized();

        assert_eq!(normalized, family);
    }
}
