//! Transaction repository
//!
//! The ledger's records, persisted under the `transactions` key in the
//! order they were added.

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, TransactionId};

use super::snapshot::SnapshotRepository;

pub const TRANSACTIONS_KEY: &str = "transactions";

pub type TransactionRepository = SnapshotRepository<Transaction>;

impl SnapshotRepository<Transaction> {
    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> LedgerResult<Option<Transaction>> {
        self.find(|txn| txn.id == id)
    }

    /// Resolve a full id or its short display form (`txn-1a2b3c4d`)
    ///
    /// An ambiguous prefix is a validation error rather than a guess.
    pub fn find_by_reference(&self, reference: &str) -> LedgerResult<Transaction> {
        if let Ok(id) = reference.parse::<TransactionId>() {
            if let Some(txn) = self.get(id)? {
                return Ok(txn);
            }
        }

        let mut matches: Vec<Transaction> = self
            .get_all()?
            .into_iter()
            .filter(|txn| txn.id.matches_short(reference))
            .collect();

        match matches.len() {
            0 => Err(LedgerError::transaction_not_found(reference)),
            1 => Ok(matches.remove(0)),
            n => Err(LedgerError::Validation(format!(
                "'{}' matches {} transactions; use a longer id",
                reference, n
            ))),
        }
    }

    /// Update a transaction in place, returning the previous version
    pub fn update(&self, txn: Transaction) -> LedgerResult<Transaction> {
        let id = txn.id;
        self.replace_where(|t| t.id == id, txn)?
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))
    }

    /// Remove a transaction by ID
    pub fn delete(&self, id: TransactionId) -> LedgerResult<Transaction> {
        self.remove_where(|t| t.id == id)?
            .ok_or_else(|| LedgerError::transaction_not_found(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionType};
    use crate::storage::kv::{FileStore, KeyValueStore, MemoryStore};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn sale(cents: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            TransactionType::Sale,
            Money::from_cents(cents),
        )
    }

    fn repo() -> TransactionRepository {
        TransactionRepository::new(Arc::new(MemoryStore::new()), TRANSACTIONS_KEY)
    }

    #[test]
    fn test_get_update_delete() {
        let repo = repo();
        let txn = sale(10000);
        let id = txn.id;
        repo.push(txn.clone()).unwrap();

        assert_eq!(repo.get(id).unwrap(), Some(txn.clone()));

        let mut paid = txn.clone();
        paid.amount_paid = Some(paid.amount_due);
        let before = repo.update(paid).unwrap();
        assert_eq!(before.amount_paid, None);
        assert!(!repo.get(id).unwrap().unwrap().is_outstanding());

        repo.delete(id).unwrap();
        assert!(repo.get(id).unwrap().is_none());
        assert!(repo.delete(id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_by_short_reference() {
        let repo = repo();
        let txn = sale(500);
        repo.push(txn.clone()).unwrap();

        let found = repo.find_by_reference(&txn.id.to_string()).unwrap();
        assert_eq!(found.id, txn.id);
        assert!(repo
            .find_by_reference("txn-zzzzzzzz")
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_loads_legacy_browser_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let store = Arc::new(FileStore::new(temp_dir.path().to_path_buf()));
        store
            .set(
                TRANSACTIONS_KEY,
                r#"[
                    {"transactionDate": "2024-01-05", "type": "Sale", "jobType": "Lawn",
                     "amount": "100", "customerName": "Jones", "recurrence": ""},
                    {"date": "2024-01-20", "type": "Expense", "category": "Fuel",
                     "amountDue": 40, "amountPaid": 40, "notes": "gas"}
                ]"#,
            )
            .unwrap();

        let repo = TransactionRepository::new(store, TRANSACTIONS_KEY);
        assert_eq!(
            repo.load().unwrap(),
            crate::storage::LoadOutcome::Loaded(2)
        );

        let all = repo.get_all().unwrap();
        assert_eq!(all[0].client_name(), Some("Jones"));
        assert_eq!(all[0].amount_due, Money::from_cents(10000));
        assert_eq!(all[1].note.as_deref(), Some("gas"));
        assert!(!all[1].is_outstanding());
    }

    #[test]
    fn test_ids_assigned_on_load_are_stable() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store
            .set(
                TRANSACTIONS_KEY,
                r#"[{"date": "2024-01-05", "type": "Sale", "amountDue": 100}]"#,
            )
            .unwrap();

        let first = TransactionRepository::new(store.clone(), TRANSACTIONS_KEY);
        first.load().unwrap();
        let shown = first.get_all().unwrap()[0].id;

        let second = TransactionRepository::new(store.clone(), TRANSACTIONS_KEY);
        second.load().unwrap();
        let found = second.find_by_reference(&shown.to_string()).unwrap();
        assert_eq!(found.id, shown);
        assert!(store.get(TRANSACTIONS_KEY).unwrap().unwrap().contains("\"id\""));
    }
}
