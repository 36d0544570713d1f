//! The ledger aggregator
//!
//! Pure functions over a slice of records: filtering, summarizing, positional
//! edits and recurring-entry materialization. None of them touch storage or
//! mutate their input; the service layer decides what to persist.
//!
//! CSV rendering of the same records lives in [`crate::export::csv`].

pub mod filter;
pub mod ops;
pub mod recurring;
pub mod summary;

pub use filter::{filter, FilterCriteria, RecurrenceFilter};
pub use ops::{checked_index, delete_at, mark_paid};
pub use recurring::materialize;
pub use summary::{summarize, ClientSummary, LedgerSummary};
