use strum_macros::Display;

/// The price a thumbnail advertises, tagged with where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PriceField {
    Discount(String),
    Regular(String),
    EverydayValue(String),
    Absent,
}

impl PriceField {
    /// Picks the lowest advertised price: a discount beats the regular
    /// price, which beats the "everyday value" fallback.
    pub fn select(
        discount: Option<String>,
        regular: Option<String>,
        everyday_value: Option<String>,
    ) -> Self {
        match (discount, regular, everyday_value) {
            (Some(discount), _, _) => Self::Discount(discount),
            (None, Some(regular), _) => Self::Regular(regular),
            (None, None, Some(everyday_value)) => Self::EverydayValue(everyday_value),
            (None, None, None) => Self::Absent,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Discount(text) | Self::Regular(text) | Self::EverydayValue(text) => Some(text),
            Self::Absent => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_beats_regular() {
        let price = PriceField::select(Some("$10".into()), Some("$20".into()), None);

        assert_eq!(price, PriceField::Discount("$10".into()));
    }

    #[test]
    fn test_regular_used_without_discount() {
        let price = PriceField::select(None, Some("$20".into()), Some("$15".into()));

        assert_eq!(price, PriceField::Regular("$20".into()));
    }

    #[test]
    fn test_everyday_value_is_the_fallback() {
        let price = PriceField::select(None, None, Some("$15".into()));

        assert_eq!(price, PriceField::EverydayValue("$15".into()));
        assert_eq!(price.to_string(), "everyday_value");
    }

    #[test]
    fn test_absent_has_no_text() {
        let price = PriceField::select(None, None, None);

        assert_eq!(price, PriceField::Absent);
        assert_eq!(price.into_text(), None);
    }
}
