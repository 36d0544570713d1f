//! Recurring template repository, persisted under `recurring_templates`

use crate::error::{LedgerError, LedgerResult};
use crate::models::{RecurringTemplate, TemplateId};

use super::snapshot::SnapshotRepository;

pub const TEMPLATES_KEY: &str = "recurring_templates";

pub type TemplateRepository = SnapshotRepository<RecurringTemplate>;

impl SnapshotRepository<RecurringTemplate> {
    pub fn get(&self, id: TemplateId) -> LedgerResult<Option<RecurringTemplate>> {
        self.find(|t| t.id == id)
    }

    /// Resolve a full id or its short display form (`rec-1a2b3c4d`)
    pub fn find_by_reference(&self, reference: &str) -> LedgerResult<RecurringTemplate> {
        let mut matches: Vec<RecurringTemplate> = self
            .get_all()?
            .into_iter()
            .filter(|t| {
                reference
                    .parse::<TemplateId>()
                    .map_or(false, |id| id == t.id)
                    || t.id.matches_short(reference)
            })
            .collect();

        match matches.len() {
            0 => Err(LedgerError::template_not_found(reference)),
            1 => Ok(matches.remove(0)),
            n => Err(LedgerError::Validation(format!(
                "'{}' matches {} templates; use a longer id",
                reference, n
            ))),
        }
    }

    pub fn delete(&self, id: TemplateId) -> LedgerResult<RecurringTemplate> {
        self.remove_where(|t| t.id == id)?
            .ok_or_else(|| LedgerError::template_not_found(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, Money, TransactionType};
    use crate::storage::kv::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_template_lookup_and_delete() {
        let repo = TemplateRepository::new(Arc::new(MemoryStore::new()), TEMPLATES_KEY);
        let template = RecurringTemplate::new(
            Frequency::Monthly,
            TransactionType::Expense,
            "Insurance",
            Money::from_cents(12000),
        );
        let id = template.id;
        repo.push(template).unwrap();
        repo.save().unwrap();

        assert!(repo.get(id).unwrap().is_some());
        assert_eq!(repo.find_by_reference(&id.to_string()).unwrap().id, id);

        repo.delete(id).unwrap();
        assert!(repo.delete(id).unwrap_err().is_not_found());
    }
}
