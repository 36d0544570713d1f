//! Service Ledger - bookkeeping for a small service business
//!
//! Records sales, expenses, deposits, refunds and recurring jobs, keeps them
//! in a JSON snapshot store, and derives filtered views, per-client and
//! per-month summaries, a text chart and CSV exports.
//!
//! # Architecture
//!
//! - `models`: transactions, recurring templates, money and ids
//! - `ledger`: pure functions over a slice of records (filter, summarize,
//!   mark paid, delete, recurring materialization)
//! - `storage`: key-value stores and whole-collection snapshot repositories
//! - `services`: validation plus the mutate, persist, audit sequence
//! - `export`: CSV and full JSON export
//! - `audit`: append-only JSONL log of every mutation
//! - `config`: path resolution and user settings
//! - `display` / `cli`: terminal output and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use service_ledger::ledger::{filter, summarize, FilterCriteria};
//!
//! let outstanding = filter(&records, &FilterCriteria::new().outstanding_only());
//! let summary = summarize(&outstanding);
//! println!("{}", summary.format_terminal("$"));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
