use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Payment token registered with the gateway, reusable in place of card
/// details for one-click payments and recurring debits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAlias {
    pub identifier: Option<String>,
    pub email: Option<String>,
    pub card_brand: Option<String>,
    /// Masked card number as the gateway reports it.
    pub card_number: Option<String>,
    pub expiry_month: Option<u32>,
    pub expiry_year: Option<i32>,
}

impl PaymentAlias {
    pub fn new() -> Self {
        Self::default()
    }

    /// Usable through the end of the expiry month. An alias with no
    /// recorded expiry is assumed usable.
    pub fn is_valid_at(&self, year: i32, month: u32) -> bool {
        if self.identifier.is_none() {
            return false;
        }
        match (self.expiry_year, self.expiry_month) {
            (Some(ey), Some(em)) => (ey, em) >= (year, month),
            _ => true,
        }
    }

    pub fn is_valid(&self) -> bool {
        let now = Utc::now();
        self.is_valid_at(now.year(), now.month())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alias(expiry_year: Option<i32>, expiry_month: Option<u32>) -> PaymentAlias {
        PaymentAlias {
            identifier: Some("a1b2c3".to_string()),
            expiry_year,
            expiry_month,
            ..PaymentAlias::default()
        }
    }

    #[test]
    fn alias_without_identifier_is_never_valid() {
        let alias = PaymentAlias::new();
        assert!(!alias.is_valid_at(2024, 6));
    }

    #[test]
    fn alias_is_valid_through_expiry_month() {
        let alias = alias(Some(2024), Some(6));
        assert!(alias.is_valid_at(2024, 5));
        assert!(alias.is_valid_at(2024, 6));
        assert!(!alias.is_valid_at(2024, 7));
        assert!(!alias.is_valid_at(2025, 1));
    }

    #[test]
    fn alias_without_expiry_is_assumed_valid() {
        let alias = alias(None, None);
        assert!(alias.is_valid_at(2099, 12));
    }
}
