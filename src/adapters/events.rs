//! Event sink that only logs.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::Transaction;
use crate::events::TransactionEventKind;
use crate::fields::FieldSet;
use crate::ports::EventSink;

/// Default sink for deployments with no business listeners wired yet.
pub struct TracingEventSink;

#[async_trait]
impl EventSink for TracingEventSink {
    async fn on_transaction_event(
        &self,
        kind: TransactionEventKind,
        transaction: Transaction,
    ) -> Transaction {
        info!(
            order_id = %transaction.id,
            event = kind.as_str(),
            "transaction event"
        );
        transaction
    }

    async fn on_order_unfound(&self, order_id: &str, raw: &FieldSet) {
        warn!(order_id, fields = raw.len(), "order unfound event");
    }
}
