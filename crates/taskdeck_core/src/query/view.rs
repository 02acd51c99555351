//! Filtered and sorted projections of the task sequence.
//!
//! # Responsibility
//! - Apply category and status restrictions, then the active sort key.
//! - Return a fresh sequence; the underlying order is never mutated.
//!
//! # Invariants
//! - Tasks without a due date order after all tasks that have one.
//! - Two tasks without a due date are equal-ranked under due-date sort.

use crate::model::task::Task;
use std::cmp::Ordering;

/// Category restriction applied to the displayed view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Exact-match restriction to one category label.
    Category(String),
}

/// Completion-status restriction applied to the displayed view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    /// Incomplete tasks only.
    Active,
    /// Completed tasks only.
    Completed,
}

/// Ordering criterion for the displayed view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Most recently created first.
    #[default]
    Created,
    /// High before medium before low.
    Priority,
    /// Earliest due date first; undated tasks last.
    DueDate,
}

impl CategoryFilter {
    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Category(name) => task.category == *name,
        }
    }
}

impl StatusFilter {
    fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Computes the filtered, sorted projection of `tasks`.
///
/// Returns a new sequence; the input is left untouched.
pub fn filtered_view(
    tasks: &[Task],
    category: &CategoryFilter,
    status: StatusFilter,
    sort: SortKey,
) -> Vec<Task> {
    let mut view: Vec<Task> = tasks
        .iter()
        .filter(|task| category.matches(task) && status.matches(task))
        .cloned()
        .collect();

    view.sort_by(|a, b| compare(sort, a, b));
    view
}

fn compare(sort: SortKey, a: &Task, b: &Task) -> Ordering {
    match sort {
        SortKey::Created => b.created_at.cmp(&a.created_at),
        SortKey::Priority => a.priority.rank().cmp(&b.priority.rank()),
        SortKey::DueDate => compare_due_dates(a, b),
    }
}

fn compare_due_dates(a: &Task, b: &Task) -> Ordering {
    match (&a.due_date, &b.due_date) {
        (Some(left), Some(right)) => left.cmp(right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
