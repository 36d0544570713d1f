//! Export module for the service ledger
//!
//! - CSV: records (and optional totals) for spreadsheets
//! - JSON: the full ledger with recurring templates, for backup

pub mod csv;
pub mod json;

pub use self::csv::{export_filename, to_csv, write_transactions_csv, HEADERS};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
