//! Export service
//!
//! CSV of a (filtered) selection of records and full JSON snapshots of the
//! ledger, plus restoring from such a snapshot.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{
    export_filename, export_full_json, import_from_json, write_transactions_csv, FullExport,
};
use crate::models::Transaction;
use crate::storage::Storage;

pub struct ExportService<'a> {
    storage: &'a Storage,
}

fn ensure_not_empty(records: &[Transaction]) -> LedgerResult<()> {
    if records.is_empty() {
        return Err(LedgerError::Export("Nothing to export".into()));
    }
    Ok(())
}

impl<'a> ExportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Write `records` to `ledger-<today>.csv` inside `dir`
    ///
    /// No file is created when there is nothing to export.
    pub fn csv_to_dir(
        &self,
        records: &[Transaction],
        include_totals: bool,
        dir: &Path,
        today: NaiveDate,
    ) -> LedgerResult<PathBuf> {
        ensure_not_empty(records)?;

        std::fs::create_dir_all(dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create export directory: {}", e)))?;
        let path = dir.join(export_filename(today));

        let file = File::create(&path)
            .map_err(|e| LedgerError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
        write_transactions_csv(records, include_totals, BufWriter::new(file))?;

        info!(path = %path.display(), rows = records.len(), "CSV exported");
        Ok(path)
    }

    /// Write `records` as CSV to any writer (stdout for clipboard use)
    pub fn csv_to_writer<W: Write>(
        &self,
        records: &[Transaction],
        include_totals: bool,
        writer: W,
    ) -> LedgerResult<()> {
        ensure_not_empty(records)?;
        write_transactions_csv(records, include_totals, writer)
    }

    /// Snapshot of every record and template
    pub fn snapshot(&self) -> LedgerResult<FullExport> {
        Ok(FullExport::new(
            self.storage.transactions.get_all()?,
            self.storage.templates.get_all()?,
        ))
    }

    pub fn json_to_writer<W: Write>(&self, writer: &mut W, pretty: bool) -> LedgerResult<()> {
        let export = self.snapshot()?;
        export_full_json(&export, writer, pretty)
    }

    /// Replace the ledger and templates with the contents of a JSON export
    pub fn restore_json(&self, json: &str) -> LedgerResult<(usize, usize)> {
        let export = import_from_json(json)?;
        let counts = (export.transactions.len(), export.recurring_templates.len());

        let previous = self.storage.transactions.len()?;
        self.storage.transactions.replace_all(export.transactions)?;
        self.storage.templates.replace_all(export.recurring_templates)?;
        self.storage.save_all()?;
        self.storage.log_clear(EntityType::Ledger, previous)?;

        info!(transactions = counts.0, templates = counts.1, "snapshot restored");
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{NewTransaction, TransactionService};
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    fn seeded() -> Storage {
        let storage = Storage::in_memory();
        let service = TransactionService::new(&storage);
        let mut sale = NewTransaction::new("2024-01-05", "Sale", "100");
        sale.client = Some("Smith, Jane".into());
        service.create(sale).unwrap();
        service
            .create(NewTransaction::new("2024-01-20", "Expense", "40"))
            .unwrap();
        storage
    }

    #[test]
    fn test_empty_selection_writes_no_file() {
        let storage = Storage::in_memory();
        let temp_dir = TempDir::new().unwrap();
        let service = ExportService::new(&storage);

        let err = service
            .csv_to_dir(&[], true, temp_dir.path(), today())
            .unwrap_err();
        assert!(matches!(err, LedgerError::Export(_)));
        assert!(!temp_dir.path().join("ledger-2024-02-01.csv").exists());
    }

    #[test]
    fn test_csv_file_named_by_date() {
        let storage = seeded();
        let temp_dir = TempDir::new().unwrap();
        let service = ExportService::new(&storage);
        let records = storage.transactions.get_all().unwrap();

        let path = service
            .csv_to_dir(&records, false, &temp_dir.path().join("out"), today())
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "ledger-2024-02-01.csv");

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "Smith, Jane");
    }

    #[test]
    fn test_json_snapshot_restore() {
        let storage = seeded();
        let service = ExportService::new(&storage);

        let mut buf = Vec::new();
        service.json_to_writer(&mut buf, true).unwrap();
        let json = String::from_utf8(buf).unwrap();

        let fresh = Storage::in_memory();
        let counts = ExportService::new(&fresh).restore_json(&json).unwrap();
        assert_eq!(counts, (2, 0));
        assert_eq!(
            fresh.transactions.get_all().unwrap(),
            storage.transactions.get_all().unwrap()
        );
    }
}
