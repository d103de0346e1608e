//! Identifier-keyed merge of an incoming task batch.
//!
//! # Invariants
//! - Incoming tasks with a known id replace the existing task in place.
//! - Incoming tasks with an unknown id are appended in batch order.
//! - Current tasks not named by the batch keep their positions.
//! - Within one batch the later duplicate id wins.

use crate::model::task::{Task, TaskId};
use std::collections::HashMap;

/// Counts reported after a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Incoming tasks that overwrote an existing position.
    pub replaced: usize,
    /// Incoming tasks that were appended.
    pub appended: usize,
}

/// Merges `incoming` into `current` and returns the new sequence.
pub fn merge_tasks(current: &[Task], incoming: &[Task]) -> Vec<Task> {
    merge_with_summary(current, incoming).0
}

/// Same as [`merge_tasks`], also reporting replace/append counts.
///
/// A task appended earlier in the same batch and then overwritten by a later
/// duplicate counts once as appended and once as replaced.
pub fn merge_with_summary(current: &[Task], incoming: &[Task]) -> (Vec<Task>, MergeSummary) {
    let mut merged = current.to_vec();
    let mut positions: HashMap<TaskId, usize> = HashMap::with_capacity(merged.len());
    for (index, task) in merged.iter().enumerate() {
        positions.entry(task.id.clone()).or_insert(index);
    }

    let mut summary = MergeSummary::default();
    for task in incoming {
        match positions.get(&task.id) {
            Some(&index) => {
                merged[index] = task.clone();
                summary.replaced += 1;
            }
            None => {
                positions.insert(task.id.clone(), merged.len());
                merged.push(task.clone());
                summary.appended += 1;
            }
        }
    }

    (merged, summary)
}

#[cfg(test)]
mod tests {
    use super::{merge_tasks, merge_with_summary, MergeSummary};
    use crate::model::task::{NewTask, Task};

    fn task(id: &str, title: &str) -> Task {
        Task::create(NewTask::titled(title), id, 0).unwrap()
    }

    #[test]
    fn replaces_in_place_and_keeps_untouched() {
        let current = vec![task("x", "old"), task("y", "keep")];
        let incoming = vec![task("x", "new")];

        let merged = merge_tasks(&current, &incoming);
        assert_eq!(merged, vec![task("x", "new"), task("y", "keep")]);
    }

    #[test]
    fn later_duplicate_in_batch_wins() {
        let incoming = vec![task("a", "first"), task("b", "other"), task("a", "second")];

        let (merged, summary) = merge_with_summary(&[], &incoming);
        assert_eq!(merged, vec![task("a", "second"), task("b", "other")]);
        assert_eq!(
            summary,
            MergeSummary {
                replaced: 1,
                appended: 2
            }
        );
    }

    #[test]
    fn empty_batch_returns_current_unchanged() {
        let current = vec![task("a", "one"), task("b", "two")];
        assert_eq!(merge_tasks(&current, &[]), current);
    }
}
