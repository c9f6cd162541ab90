use serde::{Deserialize, Serialize};

/// Company or private person, as the gateway understands it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartyStatus {
    #[default]
    Private,
    Company,
}

impl PartyStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PRIVATE" => Some(Self::Private),
            "COMPANY" => Some(Self::Company),
            _ => None,
        }
    }

    /// Unrecognized input falls back to `Private`.
    pub fn coerce(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "PRIVATE",
            Self::Company => "COMPANY",
        }
    }
}

/// Identifiable-person block shared by the customer and shipping sides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub status: PartyStatus,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub legal_name: Option<String>,
    pub street_number: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    /// ISO 3166 alpha-2 code.
    pub country: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionCustomer {
    pub contact: ContactDetails,
    pub customer_id: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionShipping {
    pub contact: ContactDetails,
    /// Second address line, sent as `vads_ship_to_street2`.
    pub complementary_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        assert_eq!(PartyStatus::parse("PRIVATE"), Some(PartyStatus::Private));
        assert_eq!(PartyStatus::parse("COMPANY"), Some(PartyStatus::Company));
        assert_eq!(PartyStatus::parse("partnership"), None);
    }

    #[test]
    fn coerces_unknown_status_to_private() {
        assert_eq!(PartyStatus::coerce("COMPANY"), PartyStatus::Company);
        assert_eq!(PartyStatus::coerce("NGO"), PartyStatus::Private);
        assert_eq!(PartyStatus::coerce(""), PartyStatus::Private);
    }
}
