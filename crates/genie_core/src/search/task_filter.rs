//! Task list filtering and text search.
//!
//! # Responsibility
//! - Filter tasks by completion status.
//! - Match a free-text query against title and description.
//!
//! # Invariants
//! - Status filter and text query are ANDed.
//! - Text match is a case-insensitive substring match on `title` OR
//!   `description`; an empty query matches every task.
//! - Output keeps collection order.

use crate::model::task::Task;

/// Completion status filter for task lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    /// Parses `all|completed|pending` (case-insensitive, trimmed).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" | "" => Some(Self::All),
            "completed" => Some(Self::Completed),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }

    pub fn accepts(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Pending => !task.completed,
        }
    }
}

/// Combined status + text filter for task lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: StatusFilter,
    /// Optional search text; trimmed before matching.
    pub query: Option<String>,
}

impl TaskFilter {
    pub fn new(status: StatusFilter, query: Option<String>) -> Self {
        Self { status, query }
    }

    /// Returns whether `task` passes both the status and the text filter.
    pub fn matches(&self, task: &Task) -> bool {
        self.status.accepts(task) && self.matches_text(task)
    }

    fn matches_text(&self, task: &Task) -> bool {
        let needle = match self.query.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => value.to_lowercase(),
            _ => return true,
        };
        task.title.to_lowercase().contains(needle.as_str())
            || task.description.to_lowercase().contains(needle.as_str())
    }
}

/// Applies `filter` to `tasks`, preserving order.
pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect()
}
