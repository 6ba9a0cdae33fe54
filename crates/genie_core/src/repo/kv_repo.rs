//! Key-value backed Domain Repository.
//!
//! # Responsibility
//! - Own the typed storage adapter and the collection locks.
//! - Define the repository error taxonomy shared by all collections.
//!
//! # Invariants
//! - Every read-modify-write cycle over a collection holds that collection's
//!   lock for its whole duration.
//! - Locks are always taken in the order users -> tasks -> notes.

use crate::model::ValidationError;
use crate::storage::{JsonStorage, KeyValueStore};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Storage key of the task collection.
pub const TASKS_KEY: &str = "@tasks";
/// Storage key of the note collection.
pub const NOTES_KEY: &str = "@notes";
/// Storage key of the current session record.
pub const CURRENT_USER_KEY: &str = "@user";
/// Storage key of the registered user list.
pub const USERS_KEY: &str = "@users";

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure result of a repository operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Record input failed validation.
    Validation(ValidationError),
    /// A user with this email is already registered.
    DuplicateUser(String),
    /// No registered user matches the email/password pair.
    InvalidCredentials,
    /// Edit target id does not exist in its collection.
    NotFound(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateUser(_) => write!(f, "an account with this email already exists"),
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Domain Repository over any `KeyValueStore` backend.
///
/// Implements `AuthRepository`, `TaskRepository` and `NoteRepository`.
pub struct KvRepository<S> {
    pub(crate) storage: JsonStorage<S>,
    users_lock: Mutex<()>,
    tasks_lock: Mutex<()>,
    notes_lock: Mutex<()>,
}

impl<S: KeyValueStore> KvRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            storage: JsonStorage::new(store),
            users_lock: Mutex::new(()),
            tasks_lock: Mutex::new(()),
            notes_lock: Mutex::new(()),
        }
    }

    /// Returns the typed storage adapter.
    pub fn storage(&self) -> &JsonStorage<S> {
        &self.storage
    }

    pub(crate) fn lock_users(&self) -> MutexGuard<'_, ()> {
        acquire(&self.users_lock)
    }

    pub(crate) fn lock_tasks(&self) -> MutexGuard<'_, ()> {
        acquire(&self.tasks_lock)
    }

    pub(crate) fn lock_notes(&self) -> MutexGuard<'_, ()> {
        acquire(&self.notes_lock)
    }
}

// The guarded data is `()`, so a poisoned lock carries no broken state.
fn acquire(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}
