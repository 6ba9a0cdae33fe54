//! Domain Repository over the key-value Persistence Adapter.
//!
//! # Responsibility
//! - Provide typed registration, authentication, session, task and note
//!   operations.
//! - Isolate storage keys and JSON shapes from service/business orchestration.
//!
//! # Invariants
//! - Record writes must pass draft/user validation before persistence.
//! - Storage faults never surface here; they degrade to absent/no-op.

pub mod kv_repo;
pub mod note_repo;
pub mod task_repo;
pub mod user_repo;
