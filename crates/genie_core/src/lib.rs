//! Core domain logic for Genie.
//! This crate is the single source of truth for tasks, notes and sessions.

pub mod db;
pub mod logging;
pub mod model;
pub mod remote;
pub mod repo;
pub mod search;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NoteDraft};
pub use model::task::{Task, TaskDraft};
pub use model::user::User;
pub use model::ValidationError;
pub use remote::{ApiError, NoopMirror, PlaceholderApi, PostPayload, RemoteMirror};
pub use repo::kv_repo::{KvRepository, RepoError, RepoResult};
pub use repo::note_repo::NoteRepository;
pub use repo::task_repo::TaskRepository;
pub use repo::user_repo::AuthRepository;
pub use search::task_filter::{filter_tasks, StatusFilter, TaskFilter};
pub use service::auth_service::{AuthForm, AuthService, AuthServiceError, FieldError};
pub use service::home_service::{HomeOverview, HomeService};
pub use service::note_service::NoteService;
pub use service::task_service::{TaskService, TaskStats};
pub use storage::{JsonStorage, KeyValueStore, MemoryKvStore, SqliteKvStore, StorageError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
