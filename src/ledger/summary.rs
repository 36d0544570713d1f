//! Ledger summaries
//!
//! Totals per transaction type, amounts due and paid, per-client activity and
//! the signed monthly net that drives the bar chart. Everything is recomputed
//! from the records passed in; nothing is cached.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{Money, Transaction, TransactionType};

/// Activity for a single client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSummary {
    /// Sum of amounts due
    pub total: Money,
    /// Number of transactions
    pub count: usize,
    /// Most recent transaction date
    pub last_date: NaiveDate,
}

impl ClientSummary {
    /// Average amount per transaction, rounded to the cent
    pub fn average(&self) -> Money {
        if self.count == 0 {
            return Money::zero();
        }
        Money::from_decimal(self.total.as_decimal() / self.count as f64).unwrap_or_default()
    }
}

/// Aggregated view of a set of records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSummary {
    /// Due totals for the registered transaction types; unregistered types are
    /// left out here but still counted in `total_due`
    pub totals_by_type: BTreeMap<TransactionType, Money>,
    pub total_due: Money,
    pub total_paid: Money,
    /// Keyed by client name; records without a client are skipped
    pub by_client: BTreeMap<String, ClientSummary>,
    /// Keyed by `YYYY-MM`; sales add, every other type subtracts
    pub by_month: BTreeMap<String, Money>,
    pub record_count: usize,
}

impl LedgerSummary {
    /// Due total for one type (zero when absent)
    pub fn type_total(&self, kind: &TransactionType) -> Money {
        self.totals_by_type.get(kind).copied().unwrap_or_default()
    }

    pub fn sales(&self) -> Money {
        self.type_total(&TransactionType::Sale)
    }

    pub fn expenses(&self) -> Money {
        self.type_total(&TransactionType::Expense)
    }

    /// Signed net across all months
    pub fn net(&self) -> Money {
        self.by_month.values().sum()
    }

    /// Amount still owed across all records
    pub fn outstanding(&self) -> Money {
        self.total_due - self.total_paid
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Ledger Summary\n");
        output.push_str(&"=".repeat(48));
        output.push('\n');
        output.push_str(&format!("Transactions: {}\n\n", self.record_count));

        output.push_str(&format!("{:<24} {:>14}\n", "Type", "Amount Due"));
        output.push_str(&"-".repeat(48));
        output.push('\n');
        for (kind, total) in &self.totals_by_type {
            output.push_str(&format!(
                "{:<24} {:>14}\n",
                kind.as_str(),
                total.format_with_symbol(currency)
            ));
        }
        output.push_str(&"-".repeat(48));
        output.push('\n');

        output.push_str(&format!(
            "{:<24} {:>14}\n",
            "Total due",
            self.total_due.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<24} {:>14}\n",
            "Total paid",
            self.total_paid.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<24} {:>14}\n",
            "Outstanding",
            self.outstanding().format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<24} {:>14}\n",
            "Net (sales - other)",
            self.net().format_with_symbol(currency)
        ));

        output
    }
}

/// Build the summary for `records`
pub fn summarize(records: &[Transaction]) -> LedgerSummary {
    let mut totals_by_type: BTreeMap<TransactionType, Money> = TransactionType::REGISTERED
        .iter()
        .map(|kind| (kind.clone(), Money::zero()))
        .collect();
    let mut by_client: BTreeMap<String, ClientSummary> = BTreeMap::new();
    let mut by_month: BTreeMap<String, Money> = BTreeMap::new();
    let mut total_due = Money::zero();
    let mut total_paid = Money::zero();

    for txn in records {
        total_due += txn.amount_due;
        total_paid += txn.paid();

        if let Some(total) = totals_by_type.get_mut(&txn.kind) {
            *total += txn.amount_due;
        }

        if let Some(client) = txn.client_name() {
            let entry = by_client
                .entry(client.to_string())
                .or_insert(ClientSummary {
                    total: Money::zero(),
                    count: 0,
                    last_date: txn.date,
                });
            entry.total += txn.amount_due;
            entry.count += 1;
            entry.last_date = entry.last_date.max(txn.date);
        }

        *by_month.entry(txn.month_key()).or_default() += txn.signed_amount();
    }

    LedgerSummary {
        totals_by_type,
        total_due,
        total_paid,
        by_client,
        by_month,
        record_count: records.len(),
    }
}
