//! In-memory storage implementation - used for tests and `ROOKIE_STORAGE=memory`.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use rookie_core::StorageError;
use rookie_core::ports::KeyValueStore;

/// In-memory key-value storage using a HashMap behind a RwLock.
///
/// An optional quota caps the total size of stored values in bytes, the way
/// browser local storage does. Data is lost when the process exits.
pub struct InMemoryStorage {
    store: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            quota: None,
        }
    }

    pub fn with_quota(bytes: usize) -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.store.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for InMemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        Ok(store.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(quota) = self.quota {
            let others: usize = store
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            if others + value.len() > quota {
                tracing::warn!(key, quota, "Storage quota exceeded");
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }

        store.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut store = self.store.write().unwrap_or_else(PoisonError::into_inner);
        store.remove(key);
        Ok(())
    }
}
