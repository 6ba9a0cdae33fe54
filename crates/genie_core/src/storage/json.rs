//! Typed JSON adapter over a `KeyValueStore`.
//!
//! # Responsibility
//! - Serialize records to JSON on write and deserialize on read.
//! - Apply the silent-degradation policy: faults are logged, never returned.
//!
//! # Invariants
//! - Log events carry the key and error only, never the stored value.

use super::{KeyValueStore, StorageError, StorageResult};
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Persistence Adapter mapping typed values to JSON strings.
pub struct JsonStorage<S> {
    store: S,
}

impl<S: KeyValueStore> JsonStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the wrapped backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serializes `value` under `key`, overwriting silently.
    ///
    /// A storage or serialization fault is logged and swallowed.
    pub fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        if let Err(err) = self.try_put(key, value) {
            error!(
                "event=storage_put module=storage status=error key={} error_code=storage_put_failed error={}",
                key, err
            );
        }
    }

    /// Reads and deserializes the value under `key`.
    ///
    /// Returns `None` when the key is absent, when the backend fails, or when
    /// the stored data is malformed.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(err @ StorageError::Deserialization { .. }) => {
                warn!(
                    "event=storage_get module=storage status=error key={} error_code=storage_malformed error={}",
                    key, err
                );
                None
            }
            Err(err) => {
                error!(
                    "event=storage_get module=storage status=error key={} error_code=storage_get_failed error={}",
                    key, err
                );
                None
            }
        }
    }

    /// Deletes `key`; absent keys are a no-op.
    pub fn remove(&self, key: &str) {
        if let Err(err) = self.store.remove_item(key) {
            error!(
                "event=storage_remove module=storage status=error key={} error_code=storage_remove_failed error={}",
                key, err
            );
        }
    }

    /// Deletes every key in one batch.
    ///
    /// Returns whether the batch reached the backend without a fault, so
    /// callers can report a failed logout without seeing the error itself.
    pub fn remove_many(&self, keys: &[&str]) -> bool {
        match self.store.multi_remove(keys) {
            Ok(()) => {
                debug!(
                    "event=storage_remove_many module=storage status=ok key_count={}",
                    keys.len()
                );
                true
            }
            Err(err) => {
                error!(
                    "event=storage_remove_many module=storage status=error key_count={} error_code=storage_remove_failed error={}",
                    keys.len(),
                    err
                );
                false
            }
        }
    }

    /// Fallible write path behind `put`.
    pub fn try_put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let encoded = serde_json::to_string(value).map_err(StorageError::Serialization)?;
        self.store.set_item(key, encoded.as_str())
    }

    /// Fallible read path behind `get`.
    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let Some(raw) = self.store.get_item(key)? else {
            return Ok(None);
        };
        serde_json::from_str(raw.as_str())
            .map(Some)
            .map_err(|source| StorageError::Deserialization {
                key: key.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::JsonStorage;
    use crate::storage::{KeyValueStore, MemoryKvStore, StorageError};

    #[test]
    fn get_of_absent_key_is_none() {
        let storage = JsonStorage::new(MemoryKvStore::new());
        assert!(storage.get::<Vec<String>>("@tasks").is_none());
    }

    #[test]
    fn malformed_value_reads_as_absent() {
        let store = MemoryKvStore::new();
        store.set_item("@tasks", "{not json").unwrap();
        let storage = JsonStorage::new(store);

        assert!(storage.get::<Vec<String>>("@tasks").is_none());
        let err = storage.try_get::<Vec<String>>("@tasks").unwrap_err();
        assert!(matches!(err, StorageError::Deserialization { ref key, .. } if key == "@tasks"));
    }

    #[test]
    fn put_then_get_returns_value() {
        let storage = JsonStorage::new(MemoryKvStore::new());
        storage.put("@tags", &vec!["a".to_string(), "b".to_string()]);

        let loaded: Vec<String> = storage.get("@tags").unwrap();
        assert_eq!(loaded, vec!["a", "b"]);
    }
}
