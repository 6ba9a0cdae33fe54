//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Flatten core results into plain response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every envelope carries `ok` and a human-readable `message`.
//! - Passwords never leave the core through this API.

use genie_core::remote::DEFAULT_BASE_URL;
use genie_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AuthForm, AuthService, AuthServiceError, HomeService, KvRepository, Note, NoteDraft,
    NoteService, NoopMirror, PlaceholderApi, RemoteMirror, SqliteKvStore, StatusFilter, Task,
    TaskDraft, TaskFilter, TaskService, TaskStats, User,
};
use log::{info, warn};
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

const STORE_DB_FILE_NAME: &str = "genie_store.sqlite3";
const MIRROR_DISABLED: &str = "off";
static STORE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static API_BASE_URL: OnceLock<Option<String>> = OnceLock::new();
// One repository per process so its collection locks cover every caller.
static STORE_REPOSITORY: OnceCell<KvRepository<SqliteKvStore>> = OnceCell::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Session user as shown to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserItem {
    pub name: String,
    pub email: String,
    pub remember_me: bool,
}

/// One auth form validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrorItem {
    /// `name|email|password`.
    pub field: String,
    pub message: String,
}

/// Response envelope for sign-up, sign-in and session lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub ok: bool,
    pub message: String,
    pub user: Option<UserItem>,
    /// Per-field messages when the form failed validation.
    pub field_errors: Vec<FieldErrorItem>,
}

impl AuthResponse {
    fn signed_in(message: impl Into<String>, user: &User) -> Self {
        Self {
            ok: true,
            message: message.into(),
            user: Some(to_user_item(user)),
            field_errors: Vec::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            user: None,
            field_errors: Vec::new(),
        }
    }

    fn from_service_error(err: AuthServiceError) -> Self {
        let field_errors = match &err {
            AuthServiceError::InvalidForm(errors) => errors
                .iter()
                .map(|error| FieldErrorItem {
                    field: error.field.as_str().to_string(),
                    message: error.message.to_string(),
                })
                .collect(),
            AuthServiceError::Repo(_) => Vec::new(),
        };
        Self {
            field_errors,
            ..Self::failure(err.to_string())
        }
    }
}

/// Generic response envelope for commands without payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

impl ActionResponse {
    fn new(ok: bool, message: impl Into<String>) -> Self {
        Self {
            ok,
            message: message.into(),
        }
    }
}

/// Task row returned to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub time: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<TaskItem>,
}

impl TaskListResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            items: Vec::new(),
        }
    }
}

/// Response envelope for save/toggle on a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    pub ok: bool,
    pub message: String,
    pub task: Option<TaskItem>,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task: &Task) -> Self {
        Self {
            ok: true,
            message: message.into(),
            task: Some(to_task_item(task)),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            task: None,
        }
    }
}

/// Completion counters for the home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatsResponse {
    pub ok: bool,
    pub message: String,
    pub total: u32,
    pub completed: u32,
    pub pending: u32,
}

/// Note row returned to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteItem {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Last save time in epoch milliseconds.
    pub date_epoch_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<NoteItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    pub ok: bool,
    pub message: String,
    pub note: Option<NoteItem>,
}

impl NoteActionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            note: None,
        }
    }
}

/// Everything the home screen needs in one round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeResponse {
    pub ok: bool,
    pub message: String,
    /// Greeting name; `User` without a session.
    pub display_name: String,
    pub user: Option<UserItem>,
    /// Tasks passing the requested filter.
    pub tasks: Vec<TaskItem>,
    pub total: u32,
    pub completed: u32,
    pub pending: u32,
}

/// Registers a new account and signs it in.
///
/// # FFI contract
/// - Store-backed; runs on the bridge worker pool.
/// - Form errors come back in `field_errors`; nothing is stored then.
pub fn auth_sign_up(
    name: String,
    email: String,
    password: String,
    remember_me: bool,
) -> AuthResponse {
    let form = AuthForm {
        remember_me,
        ..AuthForm::sign_up(name.trim(), email.trim(), password)
    };
    match with_repository(|repo| AuthService::new(repo).sign_up(&form)) {
        Ok(Ok(user)) => AuthResponse::signed_in("Account created.", &user),
        Ok(Err(err)) => AuthResponse::from_service_error(err),
        Err(err) => AuthResponse::failure(format!("auth_sign_up failed: {err}")),
    }
}

/// Signs in with email and password.
pub fn auth_sign_in(email: String, password: String) -> AuthResponse {
    let form = AuthForm::sign_in(email.trim(), password);
    match with_repository(|repo| AuthService::new(repo).sign_in(&form)) {
        Ok(Ok(user)) => AuthResponse::signed_in("Signed in.", &user),
        Ok(Err(err)) => AuthResponse::from_service_error(err),
        Err(err) => AuthResponse::failure(format!("auth_sign_in failed: {err}")),
    }
}

/// Returns the persisted session; `ok=true` with `user=None` when signed out.
pub fn auth_current_user() -> AuthResponse {
    match with_repository(|repo| AuthService::new(repo).current_user()) {
        Ok(Some(user)) => AuthResponse::signed_in("Session active.", &user),
        Ok(None) => AuthResponse {
            ok: true,
            ..AuthResponse::failure("No active session.")
        },
        Err(err) => AuthResponse::failure(format!("auth_current_user failed: {err}")),
    }
}

/// Ends the session and clears local tasks and notes.
pub fn auth_sign_out() -> ActionResponse {
    match with_repository(|repo| AuthService::new(repo).sign_out()) {
        Ok(true) => ActionResponse::new(true, "Signed out."),
        Ok(false) => ActionResponse::new(false, "auth_sign_out failed: storage error"),
        Err(err) => ActionResponse::new(false, format!("auth_sign_out failed: {err}")),
    }
}

/// Lists tasks filtered by `status` (`all|completed|pending`) and `query`.
///
/// The first call on a fresh store seeds the example tasks.
pub fn tasks_list(status: Option<String>, query: Option<String>) -> TaskListResponse {
    let filter = match parse_filter(status, query) {
        Ok(filter) => filter,
        Err(message) => return TaskListResponse::failure(message),
    };
    match with_repository(|repo| TaskService::new(repo).list_tasks(&filter)) {
        Ok(tasks) => TaskListResponse {
            ok: true,
            message: format!("Found {} task(s).", tasks.len()),
            items: tasks.iter().map(to_task_item).collect(),
        },
        Err(err) => TaskListResponse::failure(format!("tasks_list failed: {err}")),
    }
}

/// Creates a task (`id=None`) or edits task `id`.
///
/// Successful saves are mirrored to the remote API in the background.
pub fn task_save(
    id: Option<String>,
    title: String,
    description: String,
    time: String,
) -> TaskActionResponse {
    let is_edit = id.is_some();
    let draft = TaskDraft {
        id,
        title: title.trim().to_string(),
        description,
        time,
    };
    let mirror = remote_mirror();
    match with_repository(|repo| TaskService::with_mirror(repo, mirror).save_task(&draft, is_edit))
    {
        Ok(Ok(task)) => TaskActionResponse::success(
            if is_edit { "Task updated." } else { "Task created." },
            &task,
        ),
        Ok(Err(err)) => TaskActionResponse::failure(format!("task_save failed: {err}")),
        Err(err) => TaskActionResponse::failure(format!("task_save failed: {err}")),
    }
}

/// Flips the completion flag of task `id`.
pub fn task_toggle(id: String) -> TaskActionResponse {
    match with_repository(|repo| TaskService::new(repo).toggle_task(id.as_str())) {
        Ok(Some(task)) => TaskActionResponse::success("Task toggled.", &task),
        Ok(None) => TaskActionResponse::failure("Task not found."),
        Err(err) => TaskActionResponse::failure(format!("task_toggle failed: {err}")),
    }
}

/// Deletes task `id`; `ok=false` when no task was removed.
pub fn task_delete(id: String) -> ActionResponse {
    let mirror = remote_mirror();
    match with_repository(|repo| TaskService::with_mirror(repo, mirror).delete_task(id.as_str())) {
        Ok(true) => ActionResponse::new(true, "Task deleted."),
        Ok(false) => ActionResponse::new(false, "Task not found."),
        Err(err) => ActionResponse::new(false, format!("task_delete failed: {err}")),
    }
}

/// Counts total, completed and pending tasks.
pub fn task_stats() -> TaskStatsResponse {
    match with_repository(|repo| TaskService::new(repo).task_stats()) {
        Ok(stats) => {
            let (total, completed, pending) = stats_triplet(&stats);
            TaskStatsResponse {
                ok: true,
                message: format!("{completed} of {total} task(s) completed."),
                total,
                completed,
                pending,
            }
        }
        Err(err) => TaskStatsResponse {
            ok: false,
            message: format!("task_stats failed: {err}"),
            total: 0,
            completed: 0,
            pending: 0,
        },
    }
}

/// Lists notes; the first call on a fresh store seeds the example note.
pub fn notes_list() -> NoteListResponse {
    match with_repository(|repo| NoteService::new(repo).list_notes()) {
        Ok(notes) => NoteListResponse {
            ok: true,
            message: format!("Found {} note(s).", notes.len()),
            items: notes.iter().map(to_note_item).collect(),
        },
        Err(err) => NoteListResponse {
            ok: false,
            message: format!("notes_list failed: {err}"),
            items: Vec::new(),
        },
    }
}

/// Creates a note (`id=None`) or edits note `id`.
pub fn note_save(id: Option<String>, title: String, content: String) -> NoteActionResponse {
    let is_edit = id.is_some();
    let draft = NoteDraft {
        id,
        title: title.trim().to_string(),
        content,
    };
    match with_repository(|repo| NoteService::new(repo).save_note(&draft, is_edit)) {
        Ok(Ok(note)) => NoteActionResponse {
            ok: true,
            message: (if is_edit { "Note updated." } else { "Note created." }).to_string(),
            note: Some(to_note_item(&note)),
        },
        Ok(Err(err)) => NoteActionResponse::failure(format!("note_save failed: {err}")),
        Err(err) => NoteActionResponse::failure(format!("note_save failed: {err}")),
    }
}

/// Deletes note `id`; `ok=false` when no note was removed.
pub fn note_delete(id: String) -> ActionResponse {
    match with_repository(|repo| NoteService::new(repo).delete_note(id.as_str())) {
        Ok(true) => ActionResponse::new(true, "Note deleted."),
        Ok(false) => ActionResponse::new(false, "Note not found."),
        Err(err) => ActionResponse::new(false, format!("note_delete failed: {err}")),
    }
}

/// Loads the home screen: session user, filtered tasks and counters.
///
/// Also starts the background post prefetch.
pub fn home_open(status: Option<String>, query: Option<String>) -> HomeResponse {
    let failure = |message: String| HomeResponse {
        ok: false,
        message,
        display_name: String::new(),
        user: None,
        tasks: Vec::new(),
        total: 0,
        completed: 0,
        pending: 0,
    };

    let filter = match parse_filter(status, query) {
        Ok(filter) => filter,
        Err(message) => return failure(message),
    };
    let mirror = remote_mirror();
    match with_repository(|repo| HomeService::with_mirror(repo, mirror).open_home(&filter)) {
        Ok(overview) => {
            let (total, completed, pending) = stats_triplet(&overview.stats);
            HomeResponse {
                ok: true,
                message: format!("{completed} of {total} task(s) completed."),
                display_name: overview.display_name().to_string(),
                user: overview.user.as_ref().map(to_user_item),
                tasks: overview.tasks.iter().map(to_task_item).collect(),
                total,
                completed,
                pending,
            }
        }
        Err(err) => failure(format!("home_open failed: {err}")),
    }
}

fn parse_filter(status: Option<String>, query: Option<String>) -> Result<TaskFilter, String> {
    let status = match status.as_deref() {
        None => StatusFilter::All,
        Some(raw) => StatusFilter::parse(raw).ok_or_else(|| {
            format!("unsupported status filter `{raw}`; expected all|completed|pending")
        })?,
    };
    Ok(TaskFilter::new(status, query))
}

fn resolve_store_db_path() -> PathBuf {
    STORE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("GENIE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(STORE_DB_FILE_NAME)
        })
        .clone()
}

// `GENIE_API_BASE_URL=off` disables mirroring; unset or empty uses the public
// placeholder service.
fn resolve_api_base_url() -> Option<String> {
    API_BASE_URL
        .get_or_init(|| match std::env::var("GENIE_API_BASE_URL") {
            Ok(raw) if raw.trim().eq_ignore_ascii_case(MIRROR_DISABLED) => None,
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().to_string()),
            _ => Some(DEFAULT_BASE_URL.to_string()),
        })
        .clone()
}

fn remote_mirror() -> Arc<dyn RemoteMirror> {
    match resolve_api_base_url() {
        Some(base_url) => Arc::new(PlaceholderApi::with_base_url(base_url.as_str())),
        None => Arc::new(NoopMirror),
    }
}

fn with_repository<T>(f: impl FnOnce(&KvRepository<SqliteKvStore>) -> T) -> Result<T, String> {
    let repo = STORE_REPOSITORY.get_or_try_init(|| {
        let db_path = resolve_store_db_path();
        let store = SqliteKvStore::open(&db_path).map_err(|err| {
            warn!("event=store_open module=ffi status=error error={err}");
            format!("store open failed: {err}")
        })?;
        info!(
            "event=store_open module=ffi status=ok path={}",
            db_path.display()
        );
        Ok::<_, String>(KvRepository::new(store))
    })?;
    Ok(f(repo))
}

fn stats_triplet(stats: &TaskStats) -> (u32, u32, u32) {
    let clamp = |value: usize| u32::try_from(value).unwrap_or(u32::MAX);
    (
        clamp(stats.total),
        clamp(stats.completed),
        clamp(stats.pending),
    )
}

fn to_user_item(user: &User) -> UserItem {
    UserItem {
        name: user.name.clone(),
        email: user.email.clone(),
        remember_me: user.remember_me,
    }
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.clone(),
        title: task.title.clone(),
        description: task.description.clone(),
        time: task.time.clone(),
        completed: task.completed,
    }
}

fn to_note_item(note: &Note) -> NoteItem {
    NoteItem {
        id: note.id.clone(),
        title: note.title.clone(),
        content: note.content.clone(),
        date_epoch_ms: note.date,
    }
}
