//! View queries over the task sequence.
//!
//! # Responsibility
//! - Define filter state and sort keys for the displayed view.
//! - Compute filtered/sorted projections without touching store order.

pub mod view;
