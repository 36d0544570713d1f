//! Service layer
//!
//! Business logic on top of the storage layer: input validation, the
//! mutate-persist-audit sequence, and exports.

pub mod export;
pub mod recurring;
pub mod transaction;

pub use export::ExportService;
pub use recurring::{NewTemplate, RecurringService};
pub use transaction::{parse_amount, parse_date, NewTransaction, TransactionService};
