//! Transaction model
//!
//! A single ledger record: a sale, expense, deposit, refund or withdrawal,
//! optionally tied to a client and optionally produced by a recurring template.
//!
//! Older snapshots used several names for the same fields (`jobType`,
//! `customerName`, `transactionDate`, `amount`); they are accepted on load and
//! written back under the unified names.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Kind of transaction
///
/// Anything outside the registered kinds is kept verbatim as `Other` so that
/// hand-edited snapshots survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Sale,
    Expense,
    Deposit,
    Refund,
    Withdrawal,
    Other(String),
}

impl TransactionType {
    /// The registered kinds, in display order
    pub const REGISTERED: [TransactionType; 5] = [
        TransactionType::Sale,
        TransactionType::Expense,
        TransactionType::Deposit,
        TransactionType::Refund,
        TransactionType::Withdrawal,
    ];

    /// Parse a kind name (case-insensitive); unknown names become `Other`
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "sale" => Self::Sale,
            "expense" => Self::Expense,
            "deposit" => Self::Deposit,
            "refund" => Self::Refund,
            "withdrawal" => Self::Withdrawal,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Sale => "Sale",
            Self::Expense => "Expense",
            Self::Deposit => "Deposit",
            Self::Refund => "Refund",
            Self::Withdrawal => "Withdrawal",
            Self::Other(name) => name,
        }
    }

    /// Whether this is one of the registered kinds
    pub fn is_registered(&self) -> bool {
        !matches!(self, Self::Other(_))
    }

    pub fn is_sale(&self) -> bool {
        matches!(self, Self::Sale)
    }
}

impl From<String> for TransactionType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<TransactionType> for String {
    fn from(kind: TransactionType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How often a transaction repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    #[serde(alias = "")]
    None,
    Daily,
    Monthly,
}

impl Recurrence {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" | "once" => Some(Self::None),
            "daily" => Some(Self::Daily),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Label used in exports; one-time records export an empty cell
    pub fn export_label(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Daily => "daily",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Daily => write!(f, "daily"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

/// A ledger record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Stable identifier; snapshots written before ids existed get one on load
    #[serde(default)]
    pub id: TransactionId,

    #[serde(alias = "transactionDate")]
    pub date: NaiveDate,

    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Job type or expense category
    #[serde(default, alias = "jobType")]
    pub category: String,

    #[serde(alias = "amount")]
    pub amount_due: Money,

    /// Absent means nothing has been paid yet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none", alias = "notes")]
    pub note: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        alias = "customerName",
        alias = "name"
    )]
    pub client: Option<String>,

    #[serde(default)]
    pub recurrence: Recurrence,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
}

impl Transaction {
    /// Create a new one-time transaction
    pub fn new(date: NaiveDate, kind: TransactionType, amount_due: Money) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            kind,
            category: String::new(),
            amount_due,
            amount_paid: None,
            note: None,
            client: None,
            recurrence: Recurrence::None,
            end_date: None,
            payment_method: None,
        }
    }

    /// Create a transaction with the common descriptive fields
    pub fn with_details(
        date: NaiveDate,
        kind: TransactionType,
        amount_due: Money,
        category: impl Into<String>,
        client: Option<String>,
        note: Option<String>,
    ) -> Self {
        let mut txn = Self::new(date, kind, amount_due);
        txn.category = category.into();
        txn.client = client;
        txn.note = note;
        txn
    }

    /// Amount paid, treating an absent value as zero
    pub fn paid(&self) -> Money {
        self.amount_paid.unwrap_or_default()
    }

    /// Paid less than due
    pub fn is_outstanding(&self) -> bool {
        self.paid() < self.amount_due
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_recurring()
    }

    /// Year-month bucket, e.g. `2024-01`
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }

    /// Client name, if present and non-empty
    pub fn client_name(&self) -> Option<&str> {
        self.client.as_deref().filter(|c| !c.is_empty())
    }

    /// Lowercased note + client, the haystack for keyword search
    pub fn search_text(&self) -> String {
        format!(
            "{} {}",
            self.note.as_deref().unwrap_or(""),
            self.client.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }

    /// Signed contribution to monthly totals: sales add, everything else subtracts
    pub fn signed_amount(&self) -> Money {
        if self.kind.is_sale() {
            self.amount_due
        } else {
            -self.amount_due
        }
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount_due.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount_due));
        }

        if let Some(paid) = self.amount_paid {
            if paid.is_negative() {
                return Err(TransactionValidationError::NegativePayment(paid));
            }
        }

        if let Some(end) = self.end_date {
            if end < self.date {
                return Err(TransactionValidationError::EndBeforeStart {
                    date: self.date,
                    end_date: end,
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.client_name().unwrap_or("-"),
            self.amount_due
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    NegativePayment(Money),
    EndBeforeStart {
        date: NaiveDate,
        end_date: NaiveDate,
    },
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Amount due cannot be negative (got {})", amount)
            }
            Self::NegativePayment(amount) => {
                write!(f, "Amount paid cannot be negative (got {})", amount)
            }
            Self::EndBeforeStart { date, end_date } => write!(
                f,
                "End date {} is before the transaction date {}",
                end_date, date
            ),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new(
            date(2024, 1, 5),
            TransactionType::Sale,
            Money::from_cents(10000),
        );
        assert_eq!(txn.paid(), Money::zero());
        assert!(txn.is_outstanding());
        assert!(!txn.is_recurring());
        assert_eq!(txn.month_key(), "2024-01");
    }

    #[test]
    fn test_type_parse() {
        assert_eq!(TransactionType::parse("sale"), TransactionType::Sale);
        assert_eq!(TransactionType::parse(" EXPENSE "), TransactionType::Expense);
        assert_eq!(
            TransactionType::parse("Barter"),
            TransactionType::Other("Barter".into())
        );
        assert!(!TransactionType::parse("Barter").is_registered());
    }

    #[test]
    fn test_signed_amount() {
        let sale = Transaction::new(date(2024, 1, 5), TransactionType::Sale, Money::from_cents(500));
        let refund =
            Transaction::new(date(2024, 1, 5), TransactionType::Refund, Money::from_cents(200));
        assert_eq!(sale.signed_amount().cents(), 500);
        assert_eq!(refund.signed_amount().cents(), -200);
    }

    #[test]
    fn test_overpayment_is_not_outstanding() {
        let mut txn =
            Transaction::new(date(2024, 1, 5), TransactionType::Sale, Money::from_cents(100));
        txn.amount_paid = Some(Money::from_cents(150));
        assert!(!txn.is_outstanding());
        assert!(txn.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let txn =
            Transaction::new(date(2024, 1, 5), TransactionType::Sale, Money::from_cents(-100));
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::NegativeAmount(Money::from_cents(-100)))
        );
    }

    #[test]
    fn test_validate_rejects_end_before_date() {
        let mut txn =
            Transaction::new(date(2024, 3, 1), TransactionType::Sale, Money::from_cents(100));
        txn.end_date = Some(date(2024, 2, 1));
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn test_client_name_ignores_empty() {
        let mut txn =
            Transaction::new(date(2024, 1, 5), TransactionType::Sale, Money::from_cents(100));
        txn.client = Some(String::new());
        assert_eq!(txn.client_name(), None);
        txn.client = Some("   ".into());
        assert_eq!(txn.client_name(), Some("   "));
        txn.client = Some("Acme".into());
        assert_eq!(txn.client_name(), Some("Acme"));
    }

    #[test]
    fn test_deserialize_legacy_field_names() {
        let json = r#"{
            "transactionDate": "2024-02-10",
            "type": "Sale",
            "jobType": "Lawn care",
            "amount": 75,
            "customerName": "Jones",
            "recurrence": ""
        }"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.date, date(2024, 2, 10));
        assert_eq!(txn.category, "Lawn care");
        assert_eq!(txn.amount_due.cents(), 7500);
        assert_eq!(txn.client_name(), Some("Jones"));
        assert_eq!(txn.recurrence, Recurrence::None);
        assert_eq!(txn.amount_paid, None);
    }

    #[test]
    fn test_serialize_uses_unified_names() {
        let mut txn =
            Transaction::new(date(2024, 1, 5), TransactionType::Expense, Money::from_cents(4000));
        txn.category = "Fuel".into();
        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "Expense");
        assert_eq!(value["amountDue"], 40.0);
        assert_eq!(value["date"], "2024-01-05");
        assert!(value.get("amountPaid").is_none());
    }

    #[test]
    fn test_unregistered_type_round_trips() {
        let json = r#"{"date":"2024-01-01","type":"Barter","amountDue":10}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.kind, TransactionType::Other("Barter".into()));
        let back = serde_json::to_value(&txn).unwrap();
        assert_eq!(back["type"], "Barter");
    }
}
