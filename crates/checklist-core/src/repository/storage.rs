//! Key-Value Storage Backends
//!
//! The item repository persists one text blob per key. This trait mirrors the
//! Web Storage API so `window.localStorage` maps onto it directly.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::domain::DomainError;

/// Storage-level failures
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        DomainError::Persistence(err.to_string())
    }
}

/// Synchronous string key-value storage
pub trait KeyValueStorage: Send + Sync {
    /// Read the value under `key`, `None` when absent
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing an absent key succeeds
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// In-process storage
///
/// Supports an optional byte quota (keys + values, like browsers count it)
/// and a switch that makes every write fail, for exercising error paths.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
    fail_writes: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that rejects writes pushing the total size past `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Make every subsequent write fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        let mut entries = self.entries()?;
        if let Some(quota) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded(format!(
                    "{} bytes needed, {} allowed",
                    needed, quota
                )));
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("writes disabled".to_string()));
        }
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_round_trip_and_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        storage.remove_item("k").unwrap();
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_old_value() {
        let storage = MemoryStorage::with_quota(10);
        storage.set_item("k", "small").unwrap();
        let err = storage.set_item("k", "much too large").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded(_)));
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn quota_counts_replaced_value_once() {
        let storage = MemoryStorage::with_quota(6);
        storage.set_item("k", "12345").unwrap();
        storage.set_item("k", "54321").unwrap();
    }

    #[test]
    fn fail_writes_switch() {
        let storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        assert!(storage.set_item("k", "v").is_err());
        storage.set_fail_writes(false);
        assert!(storage.set_item("k", "v").is_ok());
    }

    #[test]
    fn storage_errors_become_persistence_errors() {
        let err: DomainError = StorageError::QuotaExceeded("5 bytes over".to_string()).into();
        assert_eq!(err, DomainError::Persistence("storage quota exceeded: 5 bytes over".to_string()));
    }

    #[test]
    fn arc_forwards() {
        let storage = Arc::new(MemoryStorage::new());
        let handle = Arc::clone(&storage);
        handle.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
