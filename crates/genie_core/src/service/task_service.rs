//! Task use-case service.
//!
//! # Responsibility
//! - Provide list/save/toggle/delete APIs with first-run seed data.
//! - Apply status/text filters to task lists.
//! - Hand successful writes to the remote mirror without waiting on it.
//!
//! # Invariants
//! - Remote mirroring happens only after the local write succeeded.
//! - Mirror outcomes never change the returned value.

use crate::model::task::{Task, TaskDraft};
use crate::remote::{NoopMirror, PostPayload, RemoteMirror};
use crate::repo::kv_repo::RepoResult;
use crate::repo::task_repo::TaskRepository;
use crate::search::task_filter::{filter_tasks, TaskFilter};
use std::sync::Arc;

/// Completion counters for the home screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }
}

/// First-run task collection: exactly two example tasks.
pub fn default_seed_tasks() -> Vec<Task> {
    vec![
        Task::new("1", "Google Meet").with_details("Morning standup with team", "03:30-05:00 AM"),
        Task::new("2", "Stack").with_details("Design Poster for Home screen", "03:30-09:30 AM"),
    ]
}

/// Task service facade over repository implementations.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    mirror: Arc<dyn RemoteMirror>,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service that does not mirror writes.
    pub fn new(repo: R) -> Self {
        Self::with_mirror(repo, Arc::new(NoopMirror))
    }

    pub fn with_mirror(repo: R, mirror: Arc<dyn RemoteMirror>) -> Self {
        Self { repo, mirror }
    }

    /// Lists tasks (seeding on first run) and applies `filter`.
    pub fn list_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        let tasks = self.repo.list_tasks(&default_seed_tasks());
        filter_tasks(&tasks, filter)
    }

    pub fn get_task(&self, id: &str) -> Option<Task> {
        self.repo.get_task(id)
    }

    /// Creates or edits a task, then mirrors it remotely.
    pub fn save_task(&self, draft: &TaskDraft, is_edit: bool) -> RepoResult<Task> {
        let saved = self.repo.upsert_task(draft, is_edit)?;
        let payload = PostPayload::new(saved.title.clone(), saved.description.clone());
        if is_edit {
            self.mirror.mirror_update(saved.id.clone(), payload);
        } else {
            self.mirror.mirror_create(payload);
        }
        Ok(saved)
    }

    pub fn toggle_task(&self, id: &str) -> Option<Task> {
        self.repo.toggle_task_completed(id)
    }

    /// Deletes a task; mirrors the delete only when something was removed.
    pub fn delete_task(&self, id: &str) -> bool {
        let removed = self.repo.delete_task(id);
        if removed {
            self.mirror.mirror_delete(id.to_string());
        }
        removed
    }

    /// Counters over the full (unfiltered) collection.
    pub fn task_stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.repo.list_tasks(&default_seed_tasks()))
    }
}
