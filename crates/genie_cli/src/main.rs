//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `genie_core` linkage.
//! - Optionally inspect an existing store file: `genie_cli [db_path]`.

use genie_core::repo::kv_repo::TASKS_KEY;
use genie_core::{AuthRepository, KvRepository, SqliteKvStore, Task};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("genie_core ping={}", genie_core::ping());
    println!("genie_core version={}", genie_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    let store = match SqliteKvStore::open(&db_path) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("genie_core store={db_path} error={err}");
            return ExitCode::FAILURE;
        }
    };
    let repo = KvRepository::new(store);

    let session = repo
        .current_session()
        .map(|user| user.name)
        .unwrap_or_else(|| "-".to_string());
    // Raw read: a fresh store must not get seeded by this check.
    let task_count = repo
        .storage()
        .get::<Vec<Task>>(TASKS_KEY)
        .map_or(0, |tasks| tasks.len());
    println!("genie_core store={db_path} session={session} tasks={task_count}");
    ExitCode::SUCCESS
}
