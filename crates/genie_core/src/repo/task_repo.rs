//! Task collection repository.
//!
//! # Responsibility
//! - Provide task CRUD over the `@tasks` collection.
//! - Seed the collection whenever it is absent or empty.
//!
//! # Invariants
//! - The whole collection is loaded, mutated and written back under the
//!   tasks lock.
//! - Collection order is insertion order; edits keep the position.
//! - New tasks always start with `completed = false`.

use super::kv_repo::{KvRepository, RepoError, RepoResult, TASKS_KEY};
use crate::model::task::{Task, TaskDraft};
use crate::model::{generate_record_id, now_epoch_ms, ValidationError};
use crate::storage::KeyValueStore;
use log::{debug, info};

/// Repository interface for task operations.
pub trait TaskRepository {
    /// Returns stored tasks, or writes and returns `seed` when the collection
    /// record is absent or empty.
    fn list_tasks(&self, seed: &[Task]) -> Vec<Task>;
    /// Gets one task by id without seeding.
    fn get_task(&self, id: &str) -> Option<Task>;
    /// Creates (`is_edit = false`) or replaces (`is_edit = true`) one task.
    fn upsert_task(&self, draft: &TaskDraft, is_edit: bool) -> RepoResult<Task>;
    /// Flips `completed`. Returns the updated task, or `None` when absent.
    fn toggle_task_completed(&self, id: &str) -> Option<Task>;
    /// Removes the task by id. Returns whether a task was removed.
    fn delete_task(&self, id: &str) -> bool;
}

impl<S: KeyValueStore> TaskRepository for KvRepository<S> {
    fn list_tasks(&self, seed: &[Task]) -> Vec<Task> {
        let _tasks = self.lock_tasks();
        if let Some(tasks) = self
            .storage
            .get::<Vec<Task>>(TASKS_KEY)
            .filter(|tasks| !tasks.is_empty())
        {
            return tasks;
        }

        self.storage.put(TASKS_KEY, seed);
        info!(
            "event=task_seed module=repo status=ok task_count={}",
            seed.len()
        );
        seed.to_vec()
    }

    fn get_task(&self, id: &str) -> Option<Task> {
        let _tasks = self.lock_tasks();
        self.storage
            .get::<Vec<Task>>(TASKS_KEY)
            .unwrap_or_default()
            .into_iter()
            .find(|task| task.id == id)
    }

    fn upsert_task(&self, draft: &TaskDraft, is_edit: bool) -> RepoResult<Task> {
        draft.validate()?;

        let _tasks = self.lock_tasks();
        let mut tasks: Vec<Task> = self.storage.get(TASKS_KEY).unwrap_or_default();

        let saved = if is_edit {
            let id = draft.id.as_deref().ok_or(ValidationError::MissingId)?;
            let task = tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or_else(|| RepoError::NotFound(id.to_string()))?;
            task.title = draft.title.clone();
            task.description = draft.description.clone();
            task.time = draft.time.clone();
            task.clone()
        } else {
            let id = generate_record_id(now_epoch_ms(), tasks.iter().map(|task| task.id.as_str()));
            let task = Task::new(id, draft.title.clone())
                .with_details(draft.description.clone(), draft.time.clone());
            tasks.push(task.clone());
            task
        };

        self.storage.put(TASKS_KEY, &tasks);
        info!(
            "event=task_upsert module=repo status=ok mode={} task_id={}",
            if is_edit { "edit" } else { "create" },
            saved.id
        );
        Ok(saved)
    }

    fn toggle_task_completed(&self, id: &str) -> Option<Task> {
        let _tasks = self.lock_tasks();
        let mut tasks: Vec<Task> = self.storage.get(TASKS_KEY)?;
        let Some(task) = tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=repo status=skipped reason=not_found task_id={id}");
            return None;
        };
        task.completed = !task.completed;
        let toggled = task.clone();

        self.storage.put(TASKS_KEY, &tasks);
        debug!(
            "event=task_toggle module=repo status=ok task_id={} completed={}",
            toggled.id, toggled.completed
        );
        Some(toggled)
    }

    fn delete_task(&self, id: &str) -> bool {
        let _tasks = self.lock_tasks();
        let Some(mut tasks) = self.storage.get::<Vec<Task>>(TASKS_KEY) else {
            return false;
        };
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            debug!("event=task_delete module=repo status=skipped reason=not_found task_id={id}");
            return false;
        }

        self.storage.put(TASKS_KEY, &tasks);
        info!("event=task_delete module=repo status=ok task_id={id}");
        true
    }
}

impl<R: TaskRepository + ?Sized> TaskRepository for &R {
    fn list_tasks(&self, seed: &[Task]) -> Vec<Task> {
        (**self).list_tasks(seed)
    }

    fn get_task(&self, id: &str) -> Option<Task> {
        (**self).get_task(id)
    }

    fn upsert_task(&self, draft: &TaskDraft, is_edit: bool) -> RepoResult<Task> {
        (**self).upsert_task(draft, is_edit)
    }

    fn toggle_task_completed(&self, id: &str) -> Option<Task> {
        (**self).toggle_task_completed(id)
    }

    fn delete_task(&self, id: &str) -> bool {
        (**self).delete_task(id)
    }
}
