//! Persistence layer for the task sequence.
//!
//! # Responsibility
//! - Define the snapshot slot contract and its SQLite implementation.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every save rewrites the whole slot; there are no partial writes.
//! - Loads degrade to an empty sequence instead of failing on bad data.

pub mod snapshot_repo;
