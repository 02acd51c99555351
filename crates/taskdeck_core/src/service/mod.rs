//! Use-case services for store callers.
//!
//! # Responsibility
//! - Provide the stable entry points the view layer calls into.
//! - Delegate persistence to repository implementations.

pub mod todo_service;
