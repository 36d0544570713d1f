//! Whole-collection snapshot repository
//!
//! A collection lives in memory behind a lock and is written back as one
//! JSON array under its key on every save. There is no incremental write.

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};

use super::kv::KeyValueStore;

/// What `load` found under the repository's key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The stored array was read; holds the number of entries
    Loaded(usize),
    /// Nothing stored yet; the collection starts empty
    Missing,
    /// The stored value could not be parsed; the collection starts empty
    Recovered { reason: String },
}

impl LoadOutcome {
    pub fn is_recovered(&self) -> bool {
        matches!(self, LoadOutcome::Recovered { .. })
    }
}

impl fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOutcome::Loaded(n) => write!(f, "loaded {} entries", n),
            LoadOutcome::Missing => write!(f, "no saved data"),
            LoadOutcome::Recovered { reason } => {
                write!(f, "saved data unreadable, starting empty ({})", reason)
            }
        }
    }
}

/// Whether any entry of a stored JSON array lacks an `id` field
fn has_entries_without_id(text: &str) -> bool {
    serde_json::from_str::<Vec<Value>>(text)
        .map(|entries| entries.iter().any(|entry| entry.get("id").is_none()))
        .unwrap_or(false)
}

/// In-memory collection persisted as a single snapshot
pub struct SnapshotRepository<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    data: RwLock<Vec<T>>,
}

impl<T> SnapshotRepository<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Replace the in-memory collection with what the store holds
    ///
    /// Store failures are errors; unparseable content is not. Entries stored
    /// without an `id` are assigned one on load, and the collection is written
    /// back straight away so those ids survive to the next run.
    pub fn load(&self) -> LedgerResult<LoadOutcome> {
        let raw = self.store.get(self.key)?;

        let (items, outcome, assigned_ids) = match raw {
            None => (Vec::new(), LoadOutcome::Missing, false),
            Some(text) if text.trim().is_empty() => (Vec::new(), LoadOutcome::Missing, false),
            Some(text) => match serde_json::from_str::<Vec<T>>(&text) {
                Ok(items) => {
                    let n = items.len();
                    (items, LoadOutcome::Loaded(n), has_entries_without_id(&text))
                }
                Err(e) => {
                    warn!(key = self.key, error = %e, "discarding unreadable snapshot");
                    (
                        Vec::new(),
                        LoadOutcome::Recovered {
                            reason: e.to_string(),
                        },
                        false,
                    )
                }
            },
        };

        *self.write_lock()? = items;
        debug!(key = self.key, outcome = %outcome, "snapshot loaded");

        if assigned_ids {
            match self.save() {
                Ok(()) => info!(key = self.key, "assigned ids to entries stored without one"),
                Err(e) => warn!(
                    key = self.key,
                    error = %e,
                    "could not persist assigned ids; they will change on the next load"
                ),
            }
        }
        Ok(outcome)
    }

    /// Write the whole collection under the key
    pub fn save(&self) -> LedgerResult<()> {
        let data = self.read_lock()?;
        let json = serde_json::to_string_pretty(&*data)
            .map_err(|e| LedgerError::Json(format!("Failed to serialize {}: {}", self.key, e)))?;
        self.store.set(self.key, &json)?;
        debug!(key = self.key, entries = data.len(), "snapshot saved");
        Ok(())
    }

    /// Copy of the collection in stored order
    pub fn get_all(&self) -> LedgerResult<Vec<T>> {
        Ok(self.read_lock()?.clone())
    }

    /// Swap in a new collection (not persisted until `save`)
    pub fn replace_all(&self, items: Vec<T>) -> LedgerResult<()> {
        *self.write_lock()? = items;
        Ok(())
    }

    pub fn push(&self, item: T) -> LedgerResult<()> {
        self.write_lock()?.push(item);
        Ok(())
    }

    pub fn extend(&self, items: impl IntoIterator<Item = T>) -> LedgerResult<()> {
        self.write_lock()?.extend(items);
        Ok(())
    }

    pub fn len(&self) -> LedgerResult<usize> {
        Ok(self.read_lock()?.len())
    }

    pub fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.read_lock()?.is_empty())
    }

    /// Empty the collection, returning how many entries were dropped
    pub fn clear(&self) -> LedgerResult<usize> {
        let mut data = self.write_lock()?;
        let removed = data.len();
        data.clear();
        Ok(removed)
    }

    /// First entry matching `pred`
    pub fn find(&self, pred: impl Fn(&T) -> bool) -> LedgerResult<Option<T>> {
        Ok(self.read_lock()?.iter().find(|item| pred(item)).cloned())
    }

    /// Position of the first entry matching `pred`
    pub fn position(&self, pred: impl Fn(&T) -> bool) -> LedgerResult<Option<usize>> {
        Ok(self.read_lock()?.iter().position(pred))
    }

    /// Remove the first entry matching `pred`
    pub fn remove_where(&self, pred: impl Fn(&T) -> bool) -> LedgerResult<Option<T>> {
        let mut data = self.write_lock()?;
        Ok(data
            .iter()
            .position(pred)
            .map(|index| data.remove(index)))
    }

    /// Replace the first entry matching `pred` with `item`
    pub fn replace_where(&self, pred: impl Fn(&T) -> bool, item: T) -> LedgerResult<Option<T>> {
        let mut data = self.write_lock()?;
        Ok(data
            .iter()
            .position(pred)
            .map(|index| std::mem::replace(&mut data[index], item)))
    }

    fn read_lock(&self) -> LedgerResult<std::sync::RwLockReadGuard<'_, Vec<T>>> {
        self.data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_lock(&self) -> LedgerResult<std::sync::RwLockWriteGuard<'_, Vec<T>>> {
        self.data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}
