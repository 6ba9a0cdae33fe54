//! Home screen load use-case.
//!
//! Loads the session user, the filtered task list and the counters in one
//! call, and kicks off the background post prefetch.

use crate::model::task::Task;
use crate::model::user::User;
use crate::remote::{NoopMirror, RemoteMirror};
use crate::repo::task_repo::TaskRepository;
use crate::repo::user_repo::AuthRepository;
use crate::search::task_filter::{filter_tasks, TaskFilter};
use crate::service::task_service::{default_seed_tasks, TaskStats};
use std::sync::Arc;

const FALLBACK_DISPLAY_NAME: &str = "User";

/// Everything the home screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeOverview {
    pub user: Option<User>,
    /// Tasks passing the requested filter, in collection order.
    pub tasks: Vec<Task>,
    /// Counters over the unfiltered collection.
    pub stats: TaskStats,
}

impl HomeOverview {
    /// Greeting name; falls back to `User` without a session.
    pub fn display_name(&self) -> &str {
        self.user
            .as_ref()
            .map(|user| user.name.as_str())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(FALLBACK_DISPLAY_NAME)
    }
}

pub struct HomeService<R: AuthRepository + TaskRepository> {
    repo: R,
    mirror: Arc<dyn RemoteMirror>,
}

impl<R: AuthRepository + TaskRepository> HomeService<R> {
    pub fn new(repo: R) -> Self {
        Self::with_mirror(repo, Arc::new(NoopMirror))
    }

    pub fn with_mirror(repo: R, mirror: Arc<dyn RemoteMirror>) -> Self {
        Self { repo, mirror }
    }

    pub fn open_home(&self, filter: &TaskFilter) -> HomeOverview {
        let user = self.repo.current_session();
        let all_tasks = self.repo.list_tasks(&default_seed_tasks());
        self.mirror.prefetch_posts();

        HomeOverview {
            user,
            stats: TaskStats::from_tasks(&all_tasks),
            tasks: filter_tasks(&all_tasks, filter),
        }
    }
}
