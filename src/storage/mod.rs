//! Storage layer
//!
//! Each collection is held in memory by a snapshot repository and written
//! back whole, as JSON, to a string-keyed store. `Storage` owns the
//! repositories and the optional audit logger.

pub mod file_io;
pub mod kv;
pub mod snapshot;
pub mod templates;
pub mod transactions;

pub use file_io::{read_text, write_json_atomic, write_text_atomic};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use snapshot::{LoadOutcome, SnapshotRepository};
pub use templates::{TemplateRepository, TEMPLATES_KEY};
pub use transactions::{TransactionRepository, TRANSACTIONS_KEY};

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::LedgerPaths;
use crate::error::LedgerResult;

/// Outcome of loading every collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub transactions: LoadOutcome,
    pub templates: LoadOutcome,
}

impl LoadReport {
    pub fn any_recovered(&self) -> bool {
        self.transactions.is_recovered() || self.templates.is_recovered()
    }
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    pub transactions: TransactionRepository,
    pub templates: TemplateRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// File-backed storage under `paths`, with auditing to `paths.audit_log()`
    pub fn new(paths: &LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        let store = Arc::new(FileStore::new(paths.data_dir()));
        Ok(Self::with_store(store).with_audit(AuditLogger::new(paths.audit_log())))
    }

    /// Storage over any key-value store, without auditing
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            transactions: TransactionRepository::new(store.clone(), TRANSACTIONS_KEY),
            templates: TemplateRepository::new(store, TEMPLATES_KEY),
            audit: None,
        }
    }

    /// In-memory storage (tests, dry runs)
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn without_audit(mut self) -> Self {
        self.audit = None;
        self
    }

    pub fn audit_logger(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Load all collections from the store
    pub fn load_all(&self) -> LedgerResult<LoadReport> {
        Ok(LoadReport {
            transactions: self.transactions.load()?,
            templates: self.templates.load()?,
        })
    }

    /// Save all collections to the store
    pub fn save_all(&self) -> LedgerResult<()> {
        self.transactions.save()?;
        self.templates.save()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> LedgerResult<()> {
        self.write_audit(AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> LedgerResult<()> {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.write_audit(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> LedgerResult<()> {
        self.write_audit(AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    pub fn log_clear(&self, entity_type: EntityType, removed: usize) -> LedgerResult<()> {
        self.write_audit(AuditEntry::clear(entity_type, removed))
    }

    /// Append to the audit log when one is configured
    ///
    /// Data is already saved when this runs, so a failed audit write is
    /// reported but does not fail the operation.
    fn write_audit(&self, entry: AuditEntry) -> LedgerResult<()> {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!(error = %e, operation = %entry.operation, "audit entry not written");
            }
        }
        Ok(())
    }
}
