//! SQLite bootstrap for the on-device key-value store.
//!
//! Opening a store goes through two stages: the file (or memory) connection
//! is opened, then the `kv_entries` layout is brought to `latest_version()`.
//! `DbError` says which stage failed. `SqliteKvStore` folds it into
//! `StorageError::Bootstrap`, so callers above the storage layer see one
//! error type.
//!
//! Stored record shapes (tasks/notes/users JSON) are never migrated here.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Bootstrap failure while opening the store.
#[derive(Debug)]
pub enum DbError {
    /// SQLite could not open the file (missing directory, permissions, ...).
    Open(rusqlite::Error),
    /// Connection setup or layout SQL failed on an opened connection.
    Layout(rusqlite::Error),
    /// The file was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "cannot open store: {err}"),
            Self::Layout(err) => write!(f, "cannot prepare store layout: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store layout version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open(err) | Self::Layout(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

// `?` inside bootstrap code runs on an already opened connection.
impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Layout(value)
    }
}
