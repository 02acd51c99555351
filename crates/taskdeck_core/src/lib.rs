//! Core store logic for taskdeck, a local task list manager.
//! This crate owns the task collection, its view queries and persistence.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    DueDate, DueDateParseError, Priority, Task, TaskDraft, TaskId, DEFAULT_CATEGORY,
};
pub use query::view::{filtered_view, CategoryFilter, SortKey, StatusFilter};
pub use repo::snapshot_repo::{
    RepoError, RepoResult, SnapshotRepository, SqliteSnapshotRepository, SNAPSHOT_KEY,
};
pub use service::todo_service::TodoService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
