//! In-memory transaction store.
//!
//! Reference implementation of the persistence ports, good for tests and
//! single-process deployments. The map-wide lock serializes writes, which
//! more than satisfies the per-transaction serialization the store
//! contract asks for.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::Transaction;
use crate::error::StoreError;
use crate::fields::FieldSet;
use crate::ports::{TransactionFetcher, TransactionStore};

#[derive(Default)]
pub struct MemoryTransactionStore {
    transactions: RwLock<HashMap<String, Transaction>>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, transaction: Transaction) {
        self.transactions
            .write()
            .await
            .insert(transaction.id.to_string(), transaction);
    }

    pub async fn get(&self, order_id: &str) -> Option<Transaction> {
        self.transactions.read().await.get(order_id).cloned()
    }
}

#[async_trait]
impl TransactionFetcher for MemoryTransactionStore {
    async fn fetch_transaction(
        &self,
        order_id: &str,
        _raw: &FieldSet,
    ) -> Result<Option<Transaction>, StoreError> {
        Ok(self.transactions.read().await.get(order_id).cloned())
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn persist_transaction(&self, transaction: &Transaction) -> Result<(), StoreError> {
        self.transactions
            .write()
            .await
            .insert(transaction.id.to_string(), transaction.clone());
        Ok(())
    }
}
