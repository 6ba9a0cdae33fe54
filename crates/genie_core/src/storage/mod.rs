//! Persistence Adapter over a durable string-keyed store.
//!
//! # Responsibility
//! - Define the backend contract (`KeyValueStore`) for raw string values.
//! - Provide the SQLite-backed durable backend and an in-memory backend.
//! - Map typed records to/from JSON through `JsonStorage`.
//!
//! # Invariants
//! - Writes overwrite silently; removing an absent key is a no-op.
//! - `JsonStorage` never propagates a storage fault: faults are logged and the
//!   call degrades to "absent" (reads) or "no-op" (writes).

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod json;
mod memory;
mod sqlite;

pub use json::JsonStorage;
pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer fault. Surfaced by backends, swallowed by `JsonStorage`.
#[derive(Debug)]
pub enum StorageError {
    /// Backend is unusable (for example a poisoned connection lock).
    Backend(String),
    /// The SQLite store could not be opened or prepared.
    Bootstrap(DbError),
    Sqlite(rusqlite::Error),
    /// Value could not be encoded as JSON.
    Serialization(serde_json::Error),
    /// Stored value under `key` is not valid JSON for the requested type.
    Deserialization {
        key: String,
        source: serde_json::Error,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(message) => write!(f, "storage backend unavailable: {message}"),
            Self::Bootstrap(err) => write!(f, "{err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to serialize value: {err}"),
            Self::Deserialization { key, source } => {
                write!(f, "malformed value stored under `{key}`: {source}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Backend(_) => None,
            Self::Bootstrap(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Deserialization { source, .. } => Some(source),
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Bootstrap(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Backend contract for a durable string-keyed store.
pub trait KeyValueStore {
    /// Returns the raw value stored under `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Deletes `key`. Absent keys are not an error.
    fn remove_item(&self, key: &str) -> StorageResult<()>;
    /// Deletes every key in one batch. Absent keys are not an error.
    fn multi_remove(&self, keys: &[&str]) -> StorageResult<()>;
}
