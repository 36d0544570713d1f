//! Core data models for the service ledger
//!
//! Transactions, recurring templates, money and identifiers.

pub mod ids;
pub mod money;
pub mod recurring;
pub mod transaction;

pub use ids::{TemplateId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use recurring::{Frequency, RecurringTemplate};
pub use transaction::{Recurrence, Transaction, TransactionType, TransactionValidationError};
