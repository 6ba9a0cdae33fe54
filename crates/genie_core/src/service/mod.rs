//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep FFI/CLI layers decoupled from storage keys and JSON shapes.

pub mod auth_service;
pub mod home_service;
pub mod note_service;
pub mod task_service;
