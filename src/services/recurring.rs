//! Recurring template service
//!
//! Manages templates and stamps their records into the ledger.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger;
use crate::models::{Frequency, RecurringTemplate, Transaction, TransactionType};
use crate::storage::Storage;

use super::transaction::{parse_amount, parse_date};

/// Service for recurring templates
pub struct RecurringService<'a> {
    storage: &'a Storage,
}

/// Raw input for a new template
#[derive(Debug, Clone, Default)]
pub struct NewTemplate {
    pub frequency: String,
    pub kind: String,
    pub category: String,
    pub amount_due: String,
    pub client: Option<String>,
    pub note: Option<String>,
    pub payment_method: Option<String>,
    pub end_date: Option<String>,
}

impl NewTemplate {
    pub fn validate(&self) -> LedgerResult<RecurringTemplate> {
        let frequency = Frequency::parse(&self.frequency).ok_or_else(|| {
            LedgerError::Validation(format!(
                "Unknown frequency '{}'. Use daily or monthly",
                self.frequency
            ))
        })?;

        if self.kind.trim().is_empty() {
            return Err(LedgerError::Validation("Type is required".into()));
        }

        let amount = parse_amount("Amount", &self.amount_due)?;

        let mut template = RecurringTemplate::new(
            frequency,
            TransactionType::parse(&self.kind),
            self.category.trim(),
            amount,
        );
        template.client = self.client.clone().filter(|c| !c.trim().is_empty());
        template.note = self.note.clone().filter(|n| !n.trim().is_empty());
        template.payment_method = self.payment_method.clone().filter(|p| !p.trim().is_empty());
        template.end_date = self
            .end_date
            .as_deref()
            .map(|end| parse_date("End date", end))
            .transpose()?;

        template.validate().map_err(LedgerError::Validation)?;
        Ok(template)
    }
}

impl<'a> RecurringService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn add(&self, input: NewTemplate) -> LedgerResult<RecurringTemplate> {
        let template = input.validate()?;

        self.storage.templates.push(template.clone())?;
        self.storage.templates.save()?;
        self.storage.log_create(
            EntityType::RecurringTemplate,
            template.id.as_uuid().to_string(),
            Some(template.to_string()),
            &template,
        )?;

        info!(id = %template.id, frequency = %template.frequency, "template added");
        Ok(template)
    }

    pub fn list(&self) -> LedgerResult<Vec<RecurringTemplate>> {
        self.storage.templates.get_all()
    }

    /// Remove a template; records it already produced stay in the ledger
    pub fn remove(&self, reference: &str) -> LedgerResult<RecurringTemplate> {
        let template = self.storage.templates.find_by_reference(reference)?;
        let removed = self.storage.templates.delete(template.id)?;
        self.storage.templates.save()?;
        self.storage.log_delete(
            EntityType::RecurringTemplate,
            removed.id.as_uuid().to_string(),
            Some(removed.to_string()),
            &removed,
        )?;

        info!(id = %removed.id, "template removed");
        Ok(removed)
    }

    /// Stamp the records due for `today` and persist them
    ///
    /// Safe to call on every start: a template already covered for the
    /// current day or month produces nothing.
    pub fn materialize(&self, today: NaiveDate) -> LedgerResult<Vec<Transaction>> {
        let templates = self.storage.templates.get_all()?;
        if templates.is_empty() {
            return Ok(Vec::new());
        }

        let records = self.storage.transactions.get_all()?;
        let created = ledger::materialize(&records, &templates, today);

        if created.is_empty() {
            debug!(%today, "no recurring records due");
            return Ok(created);
        }

        self.storage.transactions.extend(created.iter().cloned())?;
        self.storage.transactions.save()?;

        for txn in &created {
            self.storage.log_create(
                EntityType::Transaction,
                txn.id.as_uuid().to_string(),
                Some(format!("{} {} (recurring)", txn.date, txn.kind)),
                txn,
            )?;
        }

        info!(count = created.len(), %today, "recurring records materialized");
        Ok(created)
    }
}
