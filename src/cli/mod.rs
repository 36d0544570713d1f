//! CLI command handlers
//!
//! Bridges the clap argument parsing with the service layer. Handlers print
//! their results and return errors to `main`.

pub mod audit;
pub mod config;
pub mod export;
pub mod filter;
pub mod recurring;
pub mod report;
pub mod transaction;

pub use audit::handle_audit;
pub use config::{handle_config_command, ConfigCommands};
pub use export::{handle_export_command, handle_import, ExportCommands};
pub use filter::FilterArgs;
pub use recurring::{handle_recurring_command, RecurringCommands};
pub use report::{handle_chart, handle_clients, handle_summary};
pub use transaction::{
    handle_add, handle_clear, handle_list, handle_paid, handle_remove, handle_show, AddArgs,
    TargetArgs,
};
