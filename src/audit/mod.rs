//! Audit logging
//!
//! Records every create, update, delete and clear of ledger data with
//! before/after values in an append-only JSONL file.
//!
//! - `AuditEntry`: one logged operation
//! - `AuditLogger`: appends entries to, and reads them back from, the log file
//! - `generate_diff`: one-line summary of what changed between two snapshots

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
