use serde::{Deserialize, Serialize};

use super::ValidationError;

/// One to-do item in the `@tasks` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Creation-time derived id, unique within the collection.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-text time slot, e.g. `03:30-05:00 AM`.
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            time: String::new(),
            completed: false,
        }
    }

    pub fn with_details(mut self, description: impl Into<String>, time: impl Into<String>) -> Self {
        self.description = description.into();
        self.time = time.into();
        self
    }
}

/// Form input for creating or editing a task.
///
/// `id` is ignored on create and required on edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub id: Option<String>,
    pub title: String,
    pub description: String,
    pub time: String,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Prefills a draft for editing an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: Some(task.id.clone()),
            title: task.title.clone(),
            description: task.description.clone(),
            time: task.time.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(())
    }
}
