//! Business events emitted once a notification settles a transaction.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionEventKind {
    Succeeded,
    Rejected,
    SucceededRecurrent,
    RejectedRecurrent,
}

impl TransactionEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "payzen.transaction.succeeded",
            Self::Rejected => "payzen.transaction.rejected",
            Self::SucceededRecurrent => "payzen.transaction.succeeded_recurrent",
            Self::RejectedRecurrent => "payzen.transaction.rejected_recurrent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_are_distinct() {
        let names = [
            TransactionEventKind::Succeeded.as_str(),
            TransactionEventKind::Rejected.as_str(),
            TransactionEventKind::SucceededRecurrent.as_str(),
            TransactionEventKind::RejectedRecurrent.as_str(),
        ];
        for (i, a) in names.iter().enumerate() {
            for b in names.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
