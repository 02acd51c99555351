//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record owned by the store.
//! - Define the draft input shape and its defaulting rules.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `created_at` is set once at creation and never mutated.
//! - `completed` changes only through [`Task::toggle_completed`].
//! - Draft resolution applies the same defaults on add and update, so an
//!   omitted field always resets rather than keeping its prior value.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Sentinel category applied when the caller supplies none.
pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Stable identifier for every task in the collection.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

static DUE_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(\d{2})-(\d{2})$").expect("valid due date regex"));

/// Urgency bucket for a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Sort rank. Lower ranks order first under priority sort.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    /// Wire/display form (`high|medium|low`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar due date in ISO `YYYY-MM-DD` form, no time component.
///
/// The canonical string compares lexicographically in chronological order,
/// so `Ord` is derived from it directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(String);

/// Rejected due-date input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueDateParseError {
    input: String,
}

impl Display for DueDateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid due date `{}`; expected YYYY-MM-DD",
            self.input
        )
    }
}

impl Error for DueDateParseError {}

impl DueDate {
    /// Parses and validates a `YYYY-MM-DD` date string.
    ///
    /// # Errors
    /// - Returns an error when the input does not match the shape, or when
    ///   the month/day components are out of calendar range.
    pub fn parse(input: &str) -> Result<Self, DueDateParseError> {
        let reject = || DueDateParseError {
            input: input.to_string(),
        };

        let caps = DUE_DATE_RE.captures(input).ok_or_else(reject)?;
        let month: u8 = caps[1].parse().map_err(|_| reject())?;
        let day: u8 = caps[2].parse().map_err(|_| reject())?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(reject());
        }

        Ok(Self(input.to_string()))
    }

    /// Canonical `YYYY-MM-DD` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DueDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DueDate {
    type Err = DueDateParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

/// Caller-supplied field set for add and update operations.
///
/// Optional fields left as `None` resolve to their defaults every time the
/// draft is applied. An update that omits a field therefore resets it
/// (overwrite, not merge).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Display title. Not validated; may be empty.
    pub title: String,
    /// Defaults to `""`.
    pub description: Option<String>,
    /// Defaults to [`DEFAULT_CATEGORY`].
    pub category: Option<String>,
    /// Defaults to [`Priority::Medium`].
    pub priority: Option<Priority>,
    /// Defaults to absent.
    pub due_date: Option<DueDate>,
}

impl TaskDraft {
    /// Convenience constructor for a title-only draft.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Canonical task record persisted as part of the snapshot sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable unique ID, assigned at creation.
    pub id: TaskId,
    /// Display title. May be empty; the store performs no validation.
    pub title: String,
    /// Free-form detail text.
    pub description: String,
    /// Grouping label.
    pub category: String,
    pub priority: Priority,
    /// Optional calendar deadline.
    pub due_date: Option<DueDate>,
    /// Flipped only by the explicit toggle operation.
    pub completed: bool,
    /// Unix epoch milliseconds, set once at creation.
    pub created_at: i64,
}

impl Task {
    /// Creates a task from a draft with a freshly generated ID.
    pub fn new(draft: TaskDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description.unwrap_or_default(),
            category: draft
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            priority: draft.priority.unwrap_or_default(),
            due_date: draft.due_date,
            completed: false,
            created_at: now_epoch_ms(),
        }
    }

    /// Overwrites all mutable fields from `draft`, re-applying defaults for
    /// omitted ones.
    ///
    /// # Invariants
    /// - `id`, `completed` and `created_at` are untouched.
    pub fn overwrite(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.description = draft.description.unwrap_or_default();
        self.category = draft
            .category
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
        self.priority = draft.priority.unwrap_or_default();
        self.due_date = draft.due_date;
    }

    /// Flips the completion flag.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
