//! Transaction service
//!
//! Business logic for ledger records: validated creation, filtered listing,
//! summaries, marking paid, deletion. Every mutation goes through the pure
//! functions in `crate::ledger`, is persisted as a whole snapshot, then
//! audited.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{self, checked_index, FilterCriteria, LedgerSummary};
use crate::models::{
    Frequency, Money, Recurrence, RecurringTemplate, Transaction, TransactionId, TransactionType,
};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Raw input for a new record, as typed by the user
///
/// Everything is text so that validation happens in one place.
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount_due: String,
    pub amount_paid: Option<String>,
    pub client: Option<String>,
    pub note: Option<String>,
    pub recurrence: Option<String>,
    pub end_date: Option<String>,
    pub payment_method: Option<String>,
}

/// Parse a `YYYY-MM-DD` date typed by the user
pub fn parse_date(field: &str, value: &str) -> LedgerResult<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(LedgerError::Validation(format!("{} is required", field)));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!(
            "Invalid {}: '{}'. Use YYYY-MM-DD",
            field.to_lowercase(),
            value
        ))
    })
}

/// Parse a non-negative amount typed by the user
pub fn parse_amount(field: &str, value: &str) -> LedgerResult<Money> {
    let amount = Money::parse(value).map_err(|_| {
        LedgerError::Validation(format!(
            "Invalid {}: '{}'. Use a number like '100' or '12.50'",
            field.to_lowercase(),
            value.trim()
        ))
    })?;
    if amount.is_negative() {
        return Err(LedgerError::Validation(format!(
            "{} cannot be negative (got {})",
            field, amount
        )));
    }
    Ok(amount)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl NewTransaction {
    pub fn new(
        date: impl Into<String>,
        kind: impl Into<String>,
        amount_due: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            kind: kind.into(),
            amount_due: amount_due.into(),
            ..Self::default()
        }
    }

    /// Turn the raw input into a record, or say what is wrong with it
    pub fn validate(&self) -> LedgerResult<Transaction> {
        let date = parse_date("Date", &self.date)?;

        if self.kind.trim().is_empty() {
            return Err(LedgerError::Validation("Type is required".into()));
        }
        let kind = TransactionType::parse(&self.kind);

        let amount_due = parse_amount("Amount", &self.amount_due)?;

        let mut txn = Transaction::with_details(
            date,
            kind,
            amount_due,
            self.category.trim(),
            non_blank(self.client.clone()),
            non_blank(self.note.clone()),
        );

        if let Some(paid) = self.amount_paid.as_deref().filter(|p| !p.trim().is_empty()) {
            txn.amount_paid = Some(parse_amount("Amount paid", paid)?);
        }

        if let Some(recurrence) = self.recurrence.as_deref() {
            txn.recurrence = Recurrence::parse(recurrence).ok_or_else(|| {
                LedgerError::Validation(format!(
                    "Unknown recurrence '{}'. Use none, daily or monthly",
                    recurrence
                ))
            })?;
        }

        if let Some(end) = self.end_date.as_deref().filter(|e| !e.trim().is_empty()) {
            txn.end_date = Some(parse_date("End date", end)?);
        }

        txn.payment_method = non_blank(self.payment_method.clone());

        txn.validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;

        Ok(txn)
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Validate and append a new record
    ///
    /// A daily or monthly record also registers a recurring template so the
    /// following periods are generated automatically.
    pub fn create(&self, input: NewTransaction) -> LedgerResult<Transaction> {
        let txn = input.validate()?;

        self.storage.transactions.push(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.as_uuid().to_string(),
            Some(describe(&txn)),
            &txn,
        )?;

        let frequency = match txn.recurrence {
            Recurrence::Daily => Some(Frequency::Daily),
            Recurrence::Monthly => Some(Frequency::Monthly),
            Recurrence::None => None,
        };
        if let Some(frequency) = frequency {
            let template = template_from(&txn, frequency);
            self.storage.templates.push(template.clone())?;
            self.storage.templates.save()?;
            self.storage.log_create(
                EntityType::RecurringTemplate,
                template.id.as_uuid().to_string(),
                None,
                &template,
            )?;
            debug!(template = %template.id, "registered template for recurring record");
        }

        info!(id = %txn.id, kind = %txn.kind, amount = %txn.amount_due, "transaction added");
        Ok(txn)
    }

    /// All records in insertion order
    pub fn all(&self) -> LedgerResult<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }

    /// Records matching `criteria`, in insertion order
    pub fn list(&self, criteria: &FilterCriteria) -> LedgerResult<Vec<Transaction>> {
        Ok(ledger::filter(&self.all()?, criteria))
    }

    /// Aggregates over the records matching `criteria`
    pub fn summarize(&self, criteria: &FilterCriteria) -> LedgerResult<LedgerSummary> {
        Ok(ledger::summarize(&self.list(criteria)?))
    }

    /// Resolve a full or short id
    pub fn find(&self, reference: &str) -> LedgerResult<Transaction> {
        self.storage.transactions.find_by_reference(reference)
    }

    /// Mark a record as fully paid
    pub fn mark_paid(&self, id: TransactionId) -> LedgerResult<Transaction> {
        let records = self.all()?;
        let index = position_of(&records, id)?;
        let before = records[index].clone();

        let updated = ledger::mark_paid(&records, index)?;
        let after = updated[index].clone();

        self.storage.transactions.replace_all(updated)?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            id.as_uuid().to_string(),
            Some(describe(&after)),
            &before,
            &after,
        )?;

        info!(id = %id, paid = %after.paid(), "transaction marked paid");
        Ok(after)
    }

    /// Remove a record
    pub fn delete(&self, id: TransactionId) -> LedgerResult<Transaction> {
        let records = self.all()?;
        let index = position_of(&records, id)?;
        let removed = records[index].clone();

        let updated = ledger::delete_at(&records, index)?;

        self.storage.transactions.replace_all(updated)?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            id.as_uuid().to_string(),
            Some(describe(&removed)),
            &removed,
        )?;

        info!(id = %id, "transaction deleted");
        Ok(removed)
    }

    /// Mark paid the record shown at `index` of `displayed`
    ///
    /// `displayed` is the (possibly filtered) list the user picked from, so
    /// the position is resolved to an id before touching the full ledger.
    pub fn mark_paid_at(&self, displayed: &[Transaction], index: i64) -> LedgerResult<Transaction> {
        let index = checked_index(index, displayed.len())?;
        self.mark_paid(displayed[index].id)
    }

    /// Delete the record shown at `index` of `displayed`
    pub fn delete_at(&self, displayed: &[Transaction], index: i64) -> LedgerResult<Transaction> {
        let index = checked_index(index, displayed.len())?;
        self.delete(displayed[index].id)
    }

    /// Remove every record; templates are kept
    pub fn clear_all(&self) -> LedgerResult<usize> {
        let removed = self.storage.transactions.clear()?;
        self.storage.transactions.save()?;
        self.storage.log_clear(EntityType::Ledger, removed)?;

        info!(removed, "ledger cleared");
        Ok(removed)
    }
}

fn position_of(records: &[Transaction], id: TransactionId) -> LedgerResult<usize> {
    records
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))
}

/// Short label for audit entries
fn describe(txn: &Transaction) -> String {
    match txn.client_name() {
        Some(client) => format!("{} {} {}", txn.date, txn.kind, client),
        None => format!("{} {}", txn.date, txn.kind),
    }
}

fn template_from(txn: &Transaction, frequency: Frequency) -> RecurringTemplate {
    let mut template =
        RecurringTemplate::new(frequency, txn.kind.clone(), txn.category.clone(), txn.amount_due);
    template.note = txn.note.clone();
    template.client = txn.client.clone();
    template.payment_method = txn.payment_method.clone();
    template.end_date = txn.end_date;
    template
}
