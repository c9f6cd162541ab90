//! Inbound notification authentication and application.
//!
//! The gateway posts every payment outcome to the check URL as a flat
//! form. Nothing in a notification is trusted until its signature
//! verifies, and a verified notification still has to pass the guards of
//! its branch before any state moves.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{PaymentAlias, Transaction, TransactionStatus};
use crate::error::NotificationError;
use crate::events::TransactionEventKind;
use crate::fields::FieldSet;
use crate::ports::{EventSink, TransactionFetcher, TransactionStore};
use crate::services::signature::SignatureService;

const RESULT_CODE_OK: &str = "00";
const PAYMENT_CONFIG_SINGLE: &str = "SINGLE";
const OPERATION_DEBIT: &str = "DEBIT";

/// Where a notification claims to originate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NotificationSource {
    /// Payment page or back office.
    Payment,
    /// Automatic recurring charge.
    Recurring,
    Unknown,
}

impl NotificationSource {
    fn classify(value: &str) -> Self {
        match value {
            "PAY" | "BO" => Self::Payment,
            "REC" => Self::Recurring,
            _ => Self::Unknown,
        }
    }
}

/// Why a verified notification was deliberately left unapplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    UnknownSource,
    UnsupportedPaymentConfig,
    NotADebit,
    AlreadyFinalized,
    NoSubscription,
    NotSucceeded,
    NoRecurrenceNumber,
}

/// What handling a notification did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    Applied(TransactionEventKind),
    Ignored(IgnoreReason),
    /// Verified, but no transaction matches the order id.
    Unfound,
}

pub struct NotificationProcessor {
    signer: SignatureService,
    fetcher: Arc<dyn TransactionFetcher>,
    store: Arc<dyn TransactionStore>,
    events: Arc<dyn EventSink>,
}

impl NotificationProcessor {
    pub fn new(
        signer: SignatureService,
        fetcher: Arc<dyn TransactionFetcher>,
        store: Arc<dyn TransactionStore>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            signer,
            fetcher,
            store,
            events,
        }
    }

    /// Verifies and applies one notification.
    ///
    /// `Err` is reserved for requests the gateway should see rejected:
    /// failed authentication, missing required fields, a transaction
    /// number that contradicts ours, or a store that cannot persist.
    /// Everything the protocol tolerates, including replays and traffic
    /// for unknown orders, comes back as an `Ok` outcome.
    pub async fn handle(
        &self,
        raw: HashMap<String, String>,
    ) -> Result<NotificationOutcome, NotificationError> {
        let fields = FieldSet::from(raw);

        let signature = fields.get("signature").ok_or(NotificationError::Signature)?;
        if !self.signer.verify(signature, &fields) {
            return Err(NotificationError::Signature);
        }
        let order_id = fields
            .get("vads_order_id")
            .ok_or(NotificationError::MissingOrderId)?;
        let source = fields
            .get("vads_url_check_src")
            .map(NotificationSource::classify)
            .ok_or(NotificationError::MissingCheckSource)?;
        let auth_result = fields
            .get("vads_auth_result")
            .ok_or(NotificationError::MissingAuthResult)?
            .to_string();

        let transaction = match self.fetcher.fetch_transaction(order_id, &fields).await? {
            Some(transaction) => transaction,
            None => {
                info!(order_id, "notification for unknown order");
                self.events.on_order_unfound(order_id, &fields).await;
                return Ok(NotificationOutcome::Unfound);
            }
        };

        let (transaction, outcome) = match source {
            NotificationSource::Payment => {
                self.apply_payment(&fields, transaction, &auth_result).await?
            }
            NotificationSource::Recurring => {
                self.apply_recurring(&fields, transaction, &auth_result).await
            }
            NotificationSource::Unknown => {
                warn!(
                    order_id,
                    source = fields.get("vads_url_check_src").unwrap_or_default(),
                    "unclassified notification source"
                );
                (transaction, NotificationOutcome::Ignored(IgnoreReason::UnknownSource))
            }
        };

        match outcome {
            NotificationOutcome::Applied(kind) => {
                let mut transaction = transaction;
                transaction.touch();
                self.store.persist_transaction(&transaction).await?;
                info!(
                    order_id = %transaction.id,
                    event = kind.as_str(),
                    status = transaction.status().as_str(),
                    "notification applied"
                );
            }
            NotificationOutcome::Ignored(reason) => {
                info!(order_id = %transaction.id, reason = ?reason, "notification ignored");
            }
            NotificationOutcome::Unfound => {}
        }
        Ok(outcome)
    }

    /// Settles a waiting transaction from a payment-page or back-office
    /// notification.
    async fn apply_payment(
        &self,
        fields: &FieldSet,
        mut transaction: Transaction,
        auth_result: &str,
    ) -> Result<(Transaction, NotificationOutcome), NotificationError> {
        if fields.get("vads_payment_config") != Some(PAYMENT_CONFIG_SINGLE) {
            return Ok((
                transaction,
                NotificationOutcome::Ignored(IgnoreReason::UnsupportedPaymentConfig),
            ));
        }
        if let Some(operation) = fields.get("vads_operation_type") {
            if operation != OPERATION_DEBIT {
                return Ok((
                    transaction,
                    NotificationOutcome::Ignored(IgnoreReason::NotADebit),
                ));
            }
        }
        // The number must be ours. A mismatch is an integrity failure,
        // unlike the tolerated guards around it.
        let trans_id = fields
            .get("vads_trans_id")
            .ok_or_else(|| NotificationError::TransId(transaction.id.to_string()))?;
        if transaction.number() != Some(trans_id) {
            return Err(NotificationError::TransId(transaction.id.to_string()));
        }
        if transaction.status() != TransactionStatus::Waiting {
            return Ok((
                transaction,
                NotificationOutcome::Ignored(IgnoreReason::AlreadyFinalized),
            ));
        }

        transaction.record_response(auth_result.to_string(), fields.clone());
        update_alias(&mut transaction, fields);
        if let (Some(subscription_id), Some(subscription)) = (
            fields.get("vads_subscription"),
            transaction.subscription.as_mut(),
        ) {
            subscription.identifier = Some(subscription_id.to_string());
        }

        let kind = if auth_result == RESULT_CODE_OK {
            transaction.set_status(TransactionStatus::Succeeded);
            TransactionEventKind::Succeeded
        } else {
            transaction.set_status(TransactionStatus::Rejected);
            TransactionEventKind::Rejected
        };
        let transaction = self.events.on_transaction_event(kind, transaction).await;
        Ok((transaction, NotificationOutcome::Applied(kind)))
    }

    /// Logs one occurrence of a recurring charge against an already
    /// succeeded registration. Top-level status never moves here.
    async fn apply_recurring(
        &self,
        fields: &FieldSet,
        mut transaction: Transaction,
        auth_result: &str,
    ) -> (Transaction, NotificationOutcome) {
        if transaction.subscription.is_none() {
            return (
                transaction,
                NotificationOutcome::Ignored(IgnoreReason::NoSubscription),
            );
        }
        if transaction.status() != TransactionStatus::Succeeded {
            return (
                transaction,
                NotificationOutcome::Ignored(IgnoreReason::NotSucceeded),
            );
        }
        let recurrence_number = match fields.get("vads_recurrence_number") {
            Some(number) => number.parse::<u32>().unwrap_or(0),
            None => {
                return (
                    transaction,
                    NotificationOutcome::Ignored(IgnoreReason::NoRecurrenceNumber),
                )
            }
        };
        if fields.get("vads_operation_type") != Some(OPERATION_DEBIT) {
            return (
                transaction,
                NotificationOutcome::Ignored(IgnoreReason::NotADebit),
            );
        }

        let succeeded = auth_result == RESULT_CODE_OK;
        if let Some(subscription) = transaction.subscription.as_mut() {
            subscription.push_response(fields.clone());
            if succeeded {
                subscription.last_recurrence_number = Some(recurrence_number);
            }
        }

        let kind = if succeeded {
            TransactionEventKind::SucceededRecurrent
        } else {
            TransactionEventKind::RejectedRecurrent
        };
        let transaction = self.events.on_transaction_event(kind, transaction).await;
        (transaction, NotificationOutcome::Applied(kind))
    }
}

/// Creates or refreshes the stored payment token from the notification.
fn update_alias(transaction: &mut Transaction, fields: &FieldSet) {
    let identifier = match fields.get("vads_identifier") {
        Some(identifier) => identifier,
        None => return,
    };
    if !matches!(
        fields.get("vads_identifier_status"),
        Some("CREATED") | Some("UPDATED")
    ) {
        return;
    }

    let alias = transaction.alias.get_or_insert_with(PaymentAlias::new);
    alias.identifier = Some(identifier.to_string());
    alias.card_brand = fields.get("vads_card_brand").map(str::to_string);
    alias.card_number = fields.get("vads_card_number").map(str::to_string);
    if let Some(month) = fields.get("vads_expiry_month").and_then(|m| m.parse().ok()) {
        alias.expiry_month = Some(month);
    }
    if let Some(year) = fields.get("vads_expiry_year").and_then(|y| y.parse().ok()) {
        alias.expiry_year = Some(year);
    }
}
