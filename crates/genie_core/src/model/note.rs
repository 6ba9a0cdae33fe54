use chrono::DateTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::ValidationError;

/// One note in the `@notes` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Creation-time derived id, unique within the collection.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Last save time in epoch milliseconds.
    ///
    /// Reads also accept an RFC 3339 string, the shape older app builds
    /// persisted; writes always use milliseconds.
    #[serde(default, deserialize_with = "deserialize_note_date")]
    pub date: i64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDate {
    EpochMs(i64),
    Rfc3339(String),
}

fn deserialize_note_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match StoredDate::deserialize(deserializer)? {
        StoredDate::EpochMs(millis) => Ok(millis),
        StoredDate::Rfc3339(raw) => DateTime::parse_from_rfc3339(raw.as_str())
            .map(|parsed| parsed.timestamp_millis())
            .map_err(|err| D::Error::custom(format!("invalid note date `{raw}`: {err}"))),
    }
}

/// Form input for creating or editing a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub id: Option<String>,
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn from_note(note: &Note) -> Self {
        Self {
            id: Some(note.id.clone()),
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}
