//! Record filtering
//!
//! Every criterion is optional; an unset (or empty) criterion matches
//! everything. The output keeps the input order.

use chrono::NaiveDate;

use crate::models::{Transaction, TransactionType};

/// Which recurrence class to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecurrenceFilter {
    #[default]
    Any,
    Recurring,
    OneTime,
}

impl RecurrenceFilter {
    fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::Any => true,
            Self::Recurring => txn.is_recurring(),
            Self::OneTime => !txn.is_recurring(),
        }
    }
}

/// Filter criteria for a ledger view
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    /// Inclusive lower bound
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound
    pub to: Option<NaiveDate>,
    pub kind: Option<TransactionType>,
    /// Exact category match
    pub category: Option<String>,
    /// Case-insensitive substring of note + client
    pub keyword: Option<String>,
    pub recurrence: RecurrenceFilter,
    /// Only records where paid < due
    pub outstanding_only: bool,
}

impl FilterCriteria {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn since(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    pub fn until(mut self, date: NaiveDate) -> Self {
        self.to = Some(date);
        self
    }

    /// Filter by date range
    pub fn date_range(self, start: NaiveDate, end: NaiveDate) -> Self {
        self.since(start).until(end)
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn recurrence(mut self, recurrence: RecurrenceFilter) -> Self {
        self.recurrence = recurrence;
        self
    }

    pub fn outstanding_only(mut self) -> Self {
        self.outstanding_only = true;
        self
    }

    /// Whether no criterion is active
    pub fn is_empty(&self) -> bool {
        self.from.is_none()
            && self.to.is_none()
            && self.kind.is_none()
            && active(&self.category).is_none()
            && active(&self.keyword).is_none()
            && self.recurrence == RecurrenceFilter::Any
            && !self.outstanding_only
    }

    /// Check a single record against every active criterion
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(from) = self.from {
            if txn.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if txn.date > to {
                return false;
            }
        }
        if let Some(kind) = &self.kind {
            if &txn.kind != kind {
                return false;
            }
        }
        if let Some(category) = active(&self.category) {
            if txn.category != category {
                return false;
            }
        }
        if let Some(keyword) = active(&self.keyword) {
            if !txn.search_text().contains(&keyword.to_lowercase()) {
                return false;
            }
        }
        if !self.recurrence.matches(txn) {
            return false;
        }
        if self.outstanding_only && !txn.is_outstanding() {
            return false;
        }
        true
    }
}

/// Empty strings impose no constraint
fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Select the records matching `criteria`, preserving their relative order
pub fn filter(records: &[Transaction], criteria: &FilterCriteria) -> Vec<Transaction> {
    records
        .iter()
        .filter(|txn| criteria.matches(txn))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Recurrence};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<Transaction> {
        let mut a = Transaction::with_details(
            date(2024, 1, 5),
            TransactionType::Sale,
            Money::from_cents(10000),
            "Lawn care",
            Some("Jones".into()),
            Some("Front yard".into()),
        );
        a.amount_paid = Some(Money::from_cents(10000));

        let b = Transaction::with_details(
            date(2024, 1, 20),
            TransactionType::Expense,
            Money::from_cents(4000),
            "Fuel",
            None,
            Some("Truck refill".into()),
        );

        let mut c = Transaction::with_details(
            date(2024, 2, 3),
            TransactionType::Sale,
            Money::from_cents(7500),
            "Pool cleaning",
            Some("Smith & Sons".into()),
            None,
        );
        c.recurrence = Recurrence::Monthly;
        c.amount_paid = Some(Money::from_cents(2500));

        vec![a, b, c]
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let records = sample();
        let criteria = FilterCriteria::new();
        assert!(criteria.is_empty());
        assert_eq!(filter(&records, &criteria), records);
    }

    #[test]
    fn test_empty_strings_are_wildcards() {
        let records = sample();
        let criteria = FilterCriteria::new().category("").keyword("");
        assert!(criteria.is_empty());
        assert_eq!(filter(&records, &criteria).len(), 3);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let records = sample();
        let criteria = FilterCriteria::new().date_range(date(2024, 1, 5), date(2024, 1, 20));
        let result = filter(&records, &criteria);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].category, "Lawn care");
        assert_eq!(result[1].category, "Fuel");
    }

    #[test]
    fn test_kind_and_category() {
        let records = sample();
        let sales = filter(&records, &FilterCriteria::new().kind(TransactionType::Sale));
        assert_eq!(sales.len(), 2);

        let fuel = filter(&records, &FilterCriteria::new().category("Fuel"));
        assert_eq!(fuel.len(), 1);

        let none = filter(&records, &FilterCriteria::new().category("fuel"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_keyword_searches_note_and_client() {
        let records = sample();
        let by_note = filter(&records, &FilterCriteria::new().keyword("TRUCK"));
        assert_eq!(by_note.len(), 1);
        assert_eq!(by_note[0].category, "Fuel");

        let by_client = filter(&records, &FilterCriteria::new().keyword("sons"));
        assert_eq!(by_client.len(), 1);
        assert_eq!(by_client[0].category, "Pool cleaning");
    }

    #[test]
    fn test_recurrence_class() {
        let records = sample();
        let recurring = filter(
            &records,
            &FilterCriteria::new().recurrence(RecurrenceFilter::Recurring),
        );
        assert_eq!(recurring.len(), 1);

        let one_time = filter(
            &records,
            &FilterCriteria::new().recurrence(RecurrenceFilter::OneTime),
        );
        assert_eq!(one_time.len(), 2);
    }

    #[test]
    fn test_outstanding_only() {
        let mut paid = Transaction::new(date(2024, 1, 1), TransactionType::Sale, Money::from_cents(10000));
        paid.amount_paid = Some(Money::from_cents(10000));
        assert!(filter(&[paid], &FilterCriteria::new().outstanding_only()).is_empty());

        let mut partial =
            Transaction::new(date(2024, 1, 1), TransactionType::Sale, Money::from_cents(10000));
        partial.amount_paid = Some(Money::from_cents(5000));
        let result = filter(&[partial.clone()], &FilterCriteria::new().outstanding_only());
        assert_eq!(result, vec![partial]);
    }

    #[test]
    fn test_missing_paid_counts_as_zero() {
        let unpaid = Transaction::new(date(2024, 1, 1), TransactionType::Sale, Money::from_cents(100));
        assert_eq!(
            filter(&[unpaid], &FilterCriteria::new().outstanding_only()).len(),
            1
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let records = sample();
        let before = records.clone();
        let _ = filter(&records, &FilterCriteria::new().outstanding_only());
        assert_eq!(records, before);
    }
}
