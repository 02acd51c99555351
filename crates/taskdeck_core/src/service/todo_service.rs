//! Task store use-case service.
//!
//! # Responsibility
//! - Own the in-memory task sequence and the current filter/sort state.
//! - Persist the full sequence through the snapshot slot after every
//!   mutation.
//!
//! # Invariants
//! - Unknown-id mutations are recoverable no-ops, never errors.
//! - Insertion order of the underlying sequence is preserved.
//! - Filter and sort state are never persisted.
//! - Update keeps `id`, `completed` and `created_at`; all other fields are
//!   overwritten with the resolved draft (full replacement semantics).

use crate::model::task::{Task, TaskDraft, TaskId};
use crate::query::view::{filtered_view, CategoryFilter, SortKey, StatusFilter};
use crate::repo::snapshot_repo::{RepoResult, SnapshotRepository};
use log::info;
use std::collections::BTreeSet;

/// Owner of the task collection and its persistence and query logic.
pub struct TodoService<R: SnapshotRepository> {
    repo: R,
    tasks: Vec<Task>,
    category_filter: CategoryFilter,
    status_filter: StatusFilter,
    sort_key: SortKey,
}

impl<R: SnapshotRepository> TodoService<R> {
    /// Restores the persisted sequence and starts with default view state.
    pub fn load(repo: R) -> RepoResult<Self> {
        let tasks = repo.load_tasks()?;
        Ok(Self {
            repo,
            tasks,
            category_filter: CategoryFilter::default(),
            status_filter: StatusFilter::default(),
            sort_key: SortKey::default(),
        })
    }

    /// Creates a task from `draft` and appends it to the end of the
    /// sequence.
    ///
    /// Returns the created task. The title is not validated and may be
    /// empty.
    pub fn add(&mut self, draft: TaskDraft) -> RepoResult<Task> {
        let task = Task::new(draft);
        self.tasks.push(task.clone());
        self.repo.save_tasks(&self.tasks)?;
        info!("event=task_add module=service status=ok id={}", task.id);
        Ok(task)
    }

    /// Overwrites all mutable fields of the matching task from `draft`.
    ///
    /// Omitted draft fields reset to their defaults, not to their prior
    /// values. Returns `Ok(None)` when no task matches `id`.
    pub fn update(&mut self, id: TaskId, draft: TaskDraft) -> RepoResult<Option<Task>> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(None);
        };

        task.overwrite(draft);
        let updated = task.clone();
        self.repo.save_tasks(&self.tasks)?;
        info!("event=task_update module=service status=ok id={id}");
        Ok(Some(updated))
    }

    /// Removes the first task matching `id`.
    ///
    /// Reports whether a removal occurred.
    pub fn delete(&mut self, id: TaskId) -> RepoResult<bool> {
        let Some(position) = self.tasks.iter().position(|task| task.id == id) else {
            return Ok(false);
        };

        self.tasks.remove(position);
        self.repo.save_tasks(&self.tasks)?;
        info!("event=task_delete module=service status=ok id={id}");
        Ok(true)
    }

    /// Flips the completion flag of the matching task.
    ///
    /// Returns `Ok(None)` when no task matches `id`.
    pub fn toggle_complete(&mut self, id: TaskId) -> RepoResult<Option<Task>> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return Ok(None);
        };

        task.toggle_completed();
        let toggled = task.clone();
        self.repo.save_tasks(&self.tasks)?;
        info!(
            "event=task_toggle module=service status=ok id={id} completed={}",
            toggled.completed
        );
        Ok(Some(toggled))
    }

    /// Gets the matching task without side effects.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Distinct category labels currently in use, sorted alphabetically.
    pub fn list_categories(&self) -> Vec<String> {
        let distinct: BTreeSet<&str> = self
            .tasks
            .iter()
            .map(|task| task.category.as_str())
            .collect();
        distinct.into_iter().map(str::to_string).collect()
    }

    /// Restricts the displayed view to one category, or lifts the
    /// restriction.
    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.category_filter = filter;
    }

    /// Restricts the displayed view by completion status.
    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
    }

    /// Selects the ordering criterion for the displayed view.
    pub fn set_sort(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    /// Computes the current filtered, sorted view of the sequence.
    pub fn filtered_view(&self) -> Vec<Task> {
        filtered_view(
            &self.tasks,
            &self.category_filter,
            self.status_filter,
            self.sort_key,
        )
    }

    /// Full sequence in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}
