pub mod alias;
pub mod currency;
pub mod party;
pub mod product;
pub mod subscription;
pub mod transaction;

pub use alias::PaymentAlias;
pub use party::{ContactDetails, PartyStatus, TransactionCustomer, TransactionShipping};
pub use product::{ProductType, TransactionProduct};
pub use subscription::{Frequency, SubscriptionInfos};
pub use transaction::{Transaction, TransactionKind, TransactionStatus};
