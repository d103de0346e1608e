//! Sort pipeline for list views.
//!
//! # Invariants
//! - Incomplete tasks always precede completed ones, in every mode.
//! - The secondary key only applies between tasks with the same completion state.
//! - Sorting is stable; equal keys keep input order.

use crate::model::task::Task;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// Ordering applied to a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Completion partition only.
    #[default]
    None,
    /// High before medium before low.
    Priority,
    /// Earliest deadline first; undated tasks last.
    DueDate,
    /// Most recently created first.
    CreatedAt,
}

impl SortMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "none" => Some(Self::None),
            "priority" => Some(Self::Priority),
            "dueDate" | "due_date" | "due-date" => Some(Self::DueDate),
            "createdAt" | "created_at" | "created-at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Priority => "priority",
            Self::DueDate => "dueDate",
            Self::CreatedAt => "createdAt",
        }
    }
}

impl Display for SortMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns a freshly ordered copy of `tasks`.
pub fn sort_tasks(tasks: &[Task], mode: SortMode) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    // `sort_by` is a stable merge sort.
    sorted.sort_by(|a, b| compare_tasks(a, b, mode));
    sorted
}

/// Comparator behind [`sort_tasks`].
pub fn compare_tasks(a: &Task, b: &Task, mode: SortMode) -> Ordering {
    a.completed
        .cmp(&b.completed)
        .then_with(|| match mode {
            SortMode::None => Ordering::Equal,
            SortMode::Priority => b.priority.rank().cmp(&a.priority.rank()),
            SortMode::DueDate => compare_due_dates(a.due_date, b.due_date),
            SortMode::CreatedAt => b.created_at.cmp(&a.created_at),
        })
}

fn compare_due_dates(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
