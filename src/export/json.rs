//! JSON Export functionality
//!
//! Exports the full ledger (records and recurring templates) as a single
//! versioned JSON document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{RecurringTemplate, Transaction};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub transactions: Vec<Transaction>,

    pub recurring_templates: Vec<RecurringTemplate>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub template_count: usize,
    pub earliest_transaction: Option<String>,
    pub latest_transaction: Option<String>,
}

impl FullExport {
    pub fn new(transactions: Vec<Transaction>, recurring_templates: Vec<RecurringTemplate>) -> Self {
        let earliest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .min()
            .map(|d| d.to_string());

        let latest_transaction = transactions
            .iter()
            .map(|t| t.date)
            .max()
            .map(|d| d.to_string());

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            template_count: recurring_templates.len(),
            earliest_transaction,
            latest_transaction,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            recurring_templates,
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut seen = HashSet::new();
        for txn in &self.transactions {
            if !seen.insert(txn.id) {
                return Err(format!("Duplicate transaction id {}", txn.id));
            }
        }

        if self.metadata.transaction_count != self.transactions.len() {
            return Err(format!(
                "Metadata lists {} transactions, export holds {}",
                self.metadata.transaction_count,
                self.transactions.len()
            ));
        }

        Ok(())
    }
}

/// Write a full export to `writer`
pub fn export_full_json<W: Write>(
    export: &FullExport,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, export)
    } else {
        serde_json::to_writer(writer, export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Read an export back (for verification/restore)
pub fn import_from_json(json_str: &str) -> LedgerResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| LedgerError::Json(e.to_string()))?;
    export.validate().map_err(LedgerError::Validation)?;
    Ok(export)
}
