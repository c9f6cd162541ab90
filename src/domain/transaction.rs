//! Transaction domain entity.
//! Framework-agnostic representation of one exchange with the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::alias::PaymentAlias;
use crate::domain::party::{TransactionCustomer, TransactionShipping};
use crate::domain::product::TransactionProduct;
use crate::domain::subscription::SubscriptionInfos;
use crate::fields::FieldSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Waiting,
    Rejected,
    Succeeded,
}

impl TransactionStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "WAITING" => Some(Self::Waiting),
            "REJECTED" => Some(Self::Rejected),
            "SUCCEEDED" => Some(Self::Succeeded),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Rejected => "REJECTED",
            Self::Succeeded => "SUCCEEDED",
        }
    }
}

/// What the payment page is asked to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    #[default]
    Payment,
    Subscribe,
    PaymentSubscribe,
}

/// One payment (or subscription registration) from form generation
/// through the notifications that settle it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Merchant-side order id, sent as `vads_order_id`.
    pub id: Uuid,
    pub kind: TransactionKind,
    /// Total amount, smallest currency unit.
    pub amount: u64,
    /// ISO 4217 numeric code, e.g. "978" for EUR.
    pub currency: String,
    number: Option<String>,
    status: TransactionStatus,
    result_code: Option<String>,
    last_response: Option<FieldSet>,
    pub customer: Option<TransactionCustomer>,
    pub shipping: Option<TransactionShipping>,
    products: Vec<TransactionProduct>,
    pub subscription: Option<SubscriptionInfos>,
    pub alias: Option<PaymentAlias>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(amount: u64, currency: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            kind: TransactionKind::default(),
            amount,
            currency: currency.into(),
            number: None,
            status: TransactionStatus::Waiting,
            result_code: None,
            last_response: None,
            customer: None,
            shipping: None,
            products: Vec::new(),
            subscription: None,
            alias: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Gateway-side transaction number, unique per shop and day.
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    /// Binds the allocated number. A transaction keeps its first number;
    /// later calls are ignored and return `false`.
    pub fn assign_number(&mut self, number: String) -> bool {
        if self.number.is_some() {
            return false;
        }
        self.number = Some(number);
        true
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    /// Moves the transaction to a final status. Only a waiting transaction
    /// can move, so a replayed notification cannot flip an outcome.
    /// Returns whether the transition was applied.
    pub fn set_status(&mut self, status: TransactionStatus) -> bool {
        if self.status != TransactionStatus::Waiting || status == self.status {
            return false;
        }
        self.status = status;
        true
    }

    pub fn result_code(&self) -> Option<&str> {
        self.result_code.as_deref()
    }

    pub fn last_response(&self) -> Option<&FieldSet> {
        self.last_response.as_ref()
    }

    /// Records the outcome of the latest notification verbatim.
    pub fn record_response(&mut self, result_code: String, raw: FieldSet) {
        self.result_code = Some(result_code);
        self.last_response = Some(raw);
    }

    pub fn products(&self) -> &[TransactionProduct] {
        &self.products
    }

    pub fn add_product(&mut self, product: TransactionProduct) {
        self.products.push(product);
    }

    pub fn has_valid_alias(&self) -> bool {
        self.alias.as_ref().is_some_and(PaymentAlias::is_valid)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_transaction_starts_waiting() {
        let tx = Transaction::new(2500, "978");
        assert_eq!(tx.status(), TransactionStatus::Waiting);
        assert_eq!(tx.number(), None);
        assert_eq!(tx.result_code(), None);
    }

    #[test]
    fn number_is_assigned_once() {
        let mut tx = Transaction::new(2500, "978");
        assert!(tx.assign_number("000042".to_string()));
        assert!(!tx.assign_number("000043".to_string()));
        assert_eq!(tx.number(), Some("000042"));
    }

    #[test]
    fn waiting_moves_to_either_final_status() {
        let mut tx = Transaction::new(2500, "978");
        assert!(tx.set_status(TransactionStatus::Succeeded));
        assert_eq!(tx.status(), TransactionStatus::Succeeded);

        let mut tx = Transaction::new(2500, "978");
        assert!(tx.set_status(TransactionStatus::Rejected));
        assert_eq!(tx.status(), TransactionStatus::Rejected);
    }

    #[test]
    fn final_statuses_never_move_again() {
        let mut tx = Transaction::new(2500, "978");
        tx.set_status(TransactionStatus::Succeeded);
        assert!(!tx.set_status(TransactionStatus::Rejected));
        assert!(!tx.set_status(TransactionStatus::Waiting));
        assert_eq!(tx.status(), TransactionStatus::Succeeded);
    }

    #[test]
    fn waiting_to_waiting_is_not_a_transition() {
        let mut tx = Transaction::new(2500, "978");
        assert!(!tx.set_status(TransactionStatus::Waiting));
        assert_eq!(tx.status(), TransactionStatus::Waiting);
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            TransactionStatus::Waiting,
            TransactionStatus::Rejected,
            TransactionStatus::Succeeded,
        ] {
            assert_eq!(TransactionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TransactionStatus::parse("CANCELLED"), None);
    }
}
