//! CSV Export functionality
//!
//! One row per record under a fixed header. Per-record amounts are written as
//! plain numbers (`100`, `12.5`); totals are always written with two decimals.
//! Fields containing delimiters or quotes are quoted by the csv writer.

use chrono::NaiveDate;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::summarize;
use crate::models::{Transaction, TransactionType};

/// Column order of every export
pub const HEADERS: [&str; 10] = [
    "Date",
    "Client",
    "Type",
    "Category",
    "Amount Due",
    "Amount Paid",
    "Notes",
    "Recurrence",
    "End Date",
    "Payment Method",
];

/// File name for an export made on `today`
pub fn export_filename(today: NaiveDate) -> String {
    format!("ledger-{}.csv", today.format("%Y-%m-%d"))
}

fn record_row(txn: &Transaction) -> [String; 10] {
    [
        txn.date.format("%Y-%m-%d").to_string(),
        txn.client.clone().unwrap_or_default(),
        txn.kind.to_string(),
        txn.category.clone(),
        txn.amount_due.to_plain_string(),
        txn.amount_paid
            .map(|paid| paid.to_plain_string())
            .unwrap_or_default(),
        txn.note.clone().unwrap_or_default(),
        txn.recurrence.export_label().to_string(),
        txn.end_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        txn.payment_method.clone().unwrap_or_default(),
    ]
}

fn totals_row(label: &str, kind: &str, due: String, paid: String) -> [String; 10] {
    let mut row: [String; 10] = Default::default();
    row[0] = label.to_string();
    row[2] = kind.to_string();
    row[4] = due;
    row[5] = paid;
    row
}

/// Write `records` as CSV, optionally followed by a totals block
pub fn write_transactions_csv<W: Write>(
    records: &[Transaction],
    include_totals: bool,
    writer: W,
) -> LedgerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(HEADERS)?;

    for txn in records {
        csv_writer.write_record(record_row(txn))?;
    }

    if include_totals {
        let summary = summarize(records);

        csv_writer.write_record(<[String; 10]>::default())?;
        csv_writer.write_record(totals_row(
            "Totals",
            "",
            summary.total_due.to_fixed_string(),
            summary.total_paid.to_fixed_string(),
        ))?;

        for kind in TransactionType::REGISTERED.iter() {
            csv_writer.write_record(totals_row(
                "Total",
                kind.as_str(),
                summary.type_total(kind).to_fixed_string(),
                String::new(),
            ))?;
        }
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    Ok(())
}

/// Render `records` as CSV text
pub fn to_csv(records: &[Transaction], include_totals: bool) -> LedgerResult<String> {
    let mut buffer = Vec::new();
    write_transactions_csv(records, include_totals, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| LedgerError::Export(e.to_string()))
}
