//! String-keyed key-value stores
//!
//! The ledger persists each collection as one JSON value under one key. The
//! store behind that contract is injected: files on disk for the CLI, an
//! in-memory map for tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{LedgerError, LedgerResult};

use super::file_io::{read_text, write_text_atomic};

/// Minimal key-value contract used by the repositories
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> LedgerResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> LedgerResult<()>;

    /// Drop `key`; missing keys are not an error
    fn remove(&self, key: &str) -> LedgerResult<()>;
}

fn check_key(key: &str) -> LedgerResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(LedgerError::Storage(format!("Invalid storage key: '{}'", key)))
    }
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        check_key(key)?;
        read_text(self.path_for(key))
    }

    fn set(&self, key: &str, value: &str) -> LedgerResult<()> {
        check_key(key)?;
        write_text_atomic(self.path_for(key), value)
    }

    fn remove(&self, key: &str) -> LedgerResult<()> {
        check_key(key)?;
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path).map_err(|e| {
                LedgerError::Storage(format!("Failed to remove {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }
}

/// Volatile store, mainly for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        let entries = self.entries.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> LedgerResult<()> {
        check_key(key)?;
        let mut entries = self.entries.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> LedgerResult<()> {
        let mut entries = self.entries.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        entries.remove(key);
        Ok(())
    }
}
