//! Recurring transaction templates
//!
//! A template describes a job or bill that should appear in the ledger once
//! per day or once per month. Concrete records are stamped from it by
//! `ledger::recurring::materialize`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TemplateId;
use super::money::Money;
use super::transaction::{Recurrence, Transaction, TransactionType};

/// How often a template produces a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Monthly,
}

impl Frequency {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Some(Self::Daily),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    /// Key identifying the period `date` falls in (`2024-01-05` or `2024-01`)
    pub fn period_key(&self, date: NaiveDate) -> String {
        match self {
            Self::Daily => date.format("%Y-%m-%d").to_string(),
            Self::Monthly => date.format("%Y-%m").to_string(),
        }
    }

    pub fn as_recurrence(&self) -> Recurrence {
        match self {
            Self::Daily => Recurrence::Daily,
            Self::Monthly => Recurrence::Monthly,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

/// A recurring template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTemplate {
    #[serde(default)]
    pub id: TemplateId,

    pub frequency: Frequency,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    #[serde(default, alias = "jobType")]
    pub category: String,

    #[serde(alias = "amount")]
    pub amount_due: Money,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "notes")]
    pub note: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "customerName",
        alias = "name"
    )]
    pub client: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    /// Last day on which the template still produces records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl RecurringTemplate {
    pub fn new(
        frequency: Frequency,
        kind: TransactionType,
        category: impl Into<String>,
        amount_due: Money,
    ) -> Self {
        Self {
            id: TemplateId::new(),
            frequency,
            kind,
            category: category.into(),
            amount_due,
            note: None,
            client: None,
            payment_method: None,
            end_date: None,
        }
    }

    /// Whether the template still produces records on `today`
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.end_date.map_or(true, |end| today <= end)
    }

    /// Whether `txn` already covers this template for the period containing `today`
    pub fn is_covered_by(&self, txn: &Transaction, today: NaiveDate) -> bool {
        self.frequency.period_key(txn.date) == self.frequency.period_key(today)
            && txn.note.as_deref().unwrap_or("") == self.note.as_deref().unwrap_or("")
            && txn.category == self.category
    }

    /// Stamp a concrete record dated `today`
    pub fn stamp(&self, today: NaiveDate) -> Transaction {
        let mut txn = Transaction::with_details(
            today,
            self.kind.clone(),
            self.amount_due,
            self.category.clone(),
            self.client.clone(),
            self.note.clone(),
        );
        txn.recurrence = self.frequency.as_recurrence();
        txn.end_date = self.end_date;
        txn.payment_method = self.payment_method.clone();
        txn
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.amount_due.is_negative() {
            return Err(format!(
                "Template amount cannot be negative (got {})",
                self.amount_due
            ));
        }
        Ok(())
    }
}

impl fmt::Display for RecurringTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.frequency, self.kind, self.category, self.amount_due
        )
    }
}
