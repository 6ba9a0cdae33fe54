//! Task list filtering.
//!
//! # Responsibility
//! - Provide the read-side filter/search contract for task lists.

pub mod task_filter;
