//! Domain records persisted by the repository.
//!
//! # Responsibility
//! - Define `User`, `Task` and `Note` with their JSON shapes.
//! - Provide validation and creation-time id generation.
//!
//! # Invariants
//! - Task/note ids are unique within their collection.
//! - Required titles are non-empty after trimming.

pub mod note;
pub mod task;
pub mod user;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Validation failure for record input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required `title` is empty or whitespace-only.
    EmptyTitle,
    /// Edit requested without the id of the record to replace.
    MissingId,
    /// Required `email` is empty or whitespace-only.
    EmptyEmail,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title is required"),
            Self::MissingId => write!(f, "record id is required for edit"),
            Self::EmptyEmail => write!(f, "email is required"),
        }
    }
}

impl Error for ValidationError {}

/// Current wall-clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Generates a creation-time id not present in `taken`.
///
/// Starts from `now_ms` and bumps by one millisecond until the id is free, so
/// two records created in the same millisecond still get distinct ids.
pub fn generate_record_id<'a>(now_ms: i64, taken: impl Iterator<Item = &'a str> + Clone) -> String {
    let mut candidate = now_ms;
    loop {
        let id = candidate.to_string();
        if !taken.clone().any(|existing| existing == id) {
            return id;
        }
        candidate = candidate.saturating_add(1);
    }
}
