//! Recurring-entry materialization
//!
//! For each active template, stamp one record for the current day (daily) or
//! month (monthly) unless the ledger already holds a record for that period
//! with the same note and category. Running it again for the same day adds
//! nothing.

use chrono::NaiveDate;

use crate::models::{RecurringTemplate, Transaction};

/// New records to append to `ledger` for `today`
pub fn materialize(
    ledger: &[Transaction],
    templates: &[RecurringTemplate],
    today: NaiveDate,
) -> Vec<Transaction> {
    let mut created: Vec<Transaction> = Vec::new();

    for template in templates {
        if !template.is_active_on(today) {
            continue;
        }

        let covered = ledger
            .iter()
            .chain(created.iter())
            .any(|txn| template.is_covered_by(txn, today));

        if !covered {
            created.push(template.stamp(today));
        }
    }

    created
}

/// `ledger` followed by whatever `materialize` produces for `today`
pub fn apply(
    ledger: &[Transaction],
    templates: &[RecurringTemplate],
    today: NaiveDate,
) -> Vec<Transaction> {
    let mut result = ledger.to_vec();
    result.extend(materialize(ledger, templates, today));
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money, TransactionType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn templates() -> Vec<RecurringTemplate> {
        let mut daily = RecurringTemplate::new(
            Frequency::Daily,
            TransactionType::Expense,
            "Parking",
            Money::from_cents(800),
        );
        daily.note = Some("downtown lot".into());

        let mut monthly = RecurringTemplate::new(
            Frequency::Monthly,
            TransactionType::Sale,
            "Maintenance",
            Money::from_cents(25000),
        );
        monthly.client = Some("Harbor Cafe".into());

        vec![daily, monthly]
    }

    #[test]
    fn test_materialize_creates_one_per_template() {
        let created = materialize(&[], &templates(), date(2024, 5, 10));
        assert_eq!(created.len(), 2);
        assert!(created.iter().all(|t| t.date == date(2024, 5, 10)));
        assert!(created.iter().all(|t| t.is_recurring()));
    }

    #[test]
    fn test_materialize_is_idempotent() {
        let today = date(2024, 5, 10);
        let once = apply(&[], &templates(), today);
        let twice = apply(&once, &templates(), today);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_monthly_covered_by_earlier_record_in_month() {
        let templates = templates();
        let first = apply(&[], &templates, date(2024, 5, 1));

        let later = materialize(&first, &templates, date(2024, 5, 20));
        // Only the daily template produces a new record.
        assert_eq!(later.len(), 1);
        assert_eq!(later[0].category, "Parking");

        let next_month = materialize(&first, &templates, date(2024, 6, 1));
        assert_eq!(next_month.len(), 2);
    }

    #[test]
    fn test_expired_template_is_skipped() {
        let mut templates = templates();
        templates[0].end_date = Some(date(2024, 5, 9));
        let created = materialize(&[], &templates, date(2024, 5, 10));
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].category, "Maintenance");
    }

    #[test]
    fn test_duplicate_templates_do_not_double_insert() {
        let mut templates = templates();
        let copy = templates[0].clone();
        templates.push(copy);
        let created = materialize(&[], &templates, date(2024, 5, 10));
        assert_eq!(created.len(), 2);
    }
}
