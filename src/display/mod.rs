//! Display formatting for terminal output
//!
//! Registers, detail views, the client table and the monthly chart. All
//! functions return strings; printing is left to the CLI.

pub mod chart;
pub mod client;
pub mod recurring;
pub mod report;
pub mod transaction;

pub use chart::format_monthly_chart;
pub use client::format_client_table;
pub use recurring::format_template_list;
pub use transaction::{format_transaction_details, format_transaction_register};
