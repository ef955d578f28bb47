//! File-backed local storage.
//!
//! Keeps a flat TOML table of string values, e.g.
//!
//! ```toml
//! task_test_mode = "remote"
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use rath_core::error::Result;
use rath_core::persistence::KeyValueStorage;

use super::atomic_file::{FileLock, read_optional, write_atomic};

/// Durable key-value storage persisted to a single TOML file.
///
/// Reads are served from an in-memory copy loaded on first access. Writes
/// reload the file under an exclusive lock before applying the change, so
/// two processes sharing the file do not drop each other's keys. The lock is
/// never waited for: a write that finds it held fails with a storage error.
pub struct FileKeyValueStorage {
    path: PathBuf,
    cache: Mutex<Option<BTreeMap<String, String>>>,
}

impl FileKeyValueStorage {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cache: Mutex::new(None),
        }
    }

    fn read_table(&self) -> Result<BTreeMap<String, String>> {
        match read_optional(&self.path)? {
            Some(content) => Ok(toml::from_str(&content)?),
            None => Ok(BTreeMap::new()),
        }
    }
}

impl KeyValueStorage for FileKeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if cache.is_none() {
            *cache = Some(self.read_table()?);
        }
        Ok(cache.as_ref().and_then(|table| table.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let _lock = FileLock::try_acquire(&self.path)?;

        let mut table = self.read_table()?;
        table.insert(key.to_string(), value.to_string());
        write_atomic(&self.path, &toml::to_string_pretty(&table)?)?;

        *cache = Some(table);
        tracing::debug!("[LocalStorage] Stored '{}' in {:?}", key, self.path);
        Ok(())
    }
}
