//! Collaborator interfaces the notification engine is wired with.
//!
//! The engine never talks to a database or a message bus directly. The
//! application supplies implementations of these traits, which keeps the
//! protocol logic testable with in-memory fakes.

use async_trait::async_trait;

use crate::domain::Transaction;
use crate::error::StoreError;
use crate::events::TransactionEventKind;
use crate::fields::FieldSet;

/// Resolves the transaction a notification refers to.
#[async_trait]
pub trait TransactionFetcher: Send + Sync {
    /// `Ok(None)` means no transaction matches the order id. That is
    /// normal traffic (gateway test pings, stale retries), not an error.
    /// The raw fields are passed through so lookups can use more than
    /// the order id alone.
    async fn fetch_transaction(
        &self,
        order_id: &str,
        raw: &FieldSet,
    ) -> Result<Option<Transaction>, StoreError>;
}

/// Persists a settled transaction.
///
/// Implementations are expected to serialize writes per transaction id,
/// so two notifications for the same order cannot interleave.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn persist_transaction(&self, transaction: &Transaction) -> Result<(), StoreError>;
}

/// Receives business events once a notification has been applied.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// A listener may swap in a replacement transaction, which is then
    /// what gets persisted. Returning the argument unchanged is the
    /// common case.
    async fn on_transaction_event(
        &self,
        kind: TransactionEventKind,
        transaction: Transaction,
    ) -> Transaction;

    /// A well-signed notification referenced an order id nobody knows.
    async fn on_order_unfound(&self, order_id: &str, raw: &FieldSet);
}
