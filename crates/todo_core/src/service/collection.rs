//! Collection controller over the canonical task sequence.
//!
//! # Responsibility
//! - Own the authoritative in-memory task sequence.
//! - Expose add/toggle/remove/import entry points and derived list views.
//! - Hand the sequence to the injected store after every mutation.
//!
//! # Invariants
//! - Task ids are unique within the sequence at all times.
//! - Views are recomputed on every call and never cached.
//! - Store failures are logged and never interrupt in-memory operation.
//! - A failed import leaves the sequence untouched.

use crate::model::task::{create_task, NewTask, Task, TaskId};
use crate::repo::task_store::TaskStore;
use crate::service::merge::{merge_with_summary, MergeSummary};
use crate::transfer::{
    export_json, parse_import_bytes, parse_import_value, FormatError, TransferError,
};
use crate::view::filter::{filter_by_category, CategoryFilter};
use crate::view::sort::{sort_tasks, SortMode};
use log::{debug, error, info, warn};
use serde_json::Value;

/// Outcome of a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Number of records in the accepted batch.
    pub imported: usize,
    pub replaced: usize,
    pub appended: usize,
    /// Collection size after the merge.
    pub total: usize,
}

impl ImportSummary {
    fn new(imported: usize, merge: MergeSummary, total: usize) -> Self {
        Self {
            imported,
            replaced: merge.replaced,
            appended: merge.appended,
            total,
        }
    }
}

/// Controller owning the canonical task sequence.
pub struct TaskCollection<S: TaskStore> {
    store: S,
    tasks: Vec<Task>,
}

impl<S: TaskStore> TaskCollection<S> {
    /// Starts an empty collection without reading the store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            tasks: Vec::new(),
        }
    }

    /// Restores the last stored sequence.
    ///
    /// # Side effects
    /// - A store failure is logged and yields an empty collection.
    /// - Records with a blank id are dropped; duplicate ids collapse into the
    ///   first position with the last record's content.
    pub fn load(store: S) -> Self {
        let records = match store.load() {
            Ok(records) => records,
            Err(err) => {
                error!(
                    "event=store_load module=collection status=error error={}",
                    err
                );
                return Self::new(store);
            }
        };

        let loaded_count = records.len();
        let mut tasks = Vec::with_capacity(loaded_count);
        for record in records {
            match record.into_task() {
                Ok(task) => tasks.push(task),
                Err(err) => warn!(
                    "event=store_load module=collection status=skip_record error={}",
                    err
                ),
            }
        }
        let (tasks, _) = merge_with_summary(&[], &tasks);

        info!(
            "event=store_load module=collection status=ok records={} tasks={}",
            loaded_count,
            tasks.len()
        );
        Self { store, tasks }
    }

    /// Canonical sequence in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a task from `request` and appends it.
    ///
    /// Returns `None` without touching state when the title is blank.
    pub fn add(&mut self, request: NewTask) -> Option<TaskId> {
        let task = match create_task(request) {
            Ok(task) => task,
            Err(err) => {
                debug!("event=task_add module=collection status=rejected reason={err}");
                return None;
            }
        };
        self.insert(task)
    }

    /// Appends an already-built task.
    ///
    /// Returns `None` when the id is already present, keeping ids unique.
    pub fn insert(&mut self, task: Task) -> Option<TaskId> {
        if self.get(&task.id).is_some() {
            warn!(
                "event=task_add module=collection status=rejected reason=duplicate_id id={}",
                task.id
            );
            return None;
        }

        let id = task.id.clone();
        self.tasks.push(task);
        info!("event=task_add module=collection status=ok id={id}");
        self.persist();
        Some(id)
    }

    /// Flips completion of the task with `id`; `false` when not found.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=collection status=not_found id={id}");
            return false;
        };

        task.toggle();
        info!(
            "event=task_toggle module=collection status=ok id={id} completed={}",
            task.completed
        );
        self.persist();
        true
    }

    /// Deletes the task with `id`; `false` when not found.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            debug!("event=task_remove module=collection status=not_found id={id}");
            return false;
        }

        info!("event=task_remove module=collection status=ok id={id}");
        self.persist();
        true
    }

    /// Validates raw import bytes and merges them into the sequence.
    pub fn import_merge(&mut self, raw: &[u8]) -> Result<ImportSummary, FormatError> {
        let incoming = parse_import_bytes(raw).inspect_err(log_import_rejected)?;
        Ok(self.merge(&incoming))
    }

    /// Validates an already-parsed JSON payload and merges it.
    pub fn import_merge_value(&mut self, value: Value) -> Result<ImportSummary, FormatError> {
        let incoming = parse_import_value(value).inspect_err(log_import_rejected)?;
        Ok(self.merge(&incoming))
    }

    /// Merges a validated batch into the sequence.
    pub fn merge(&mut self, incoming: &[Task]) -> ImportSummary {
        let (merged, summary) = merge_with_summary(&self.tasks, incoming);
        self.tasks = merged;
        let summary = ImportSummary::new(incoming.len(), summary, self.tasks.len());
        info!(
            "event=import_merge module=collection status=ok imported={} replaced={} appended={} total={}",
            summary.imported, summary.replaced, summary.appended, summary.total
        );
        self.persist();
        summary
    }

    /// Filtered then sorted view of the sequence.
    pub fn view(&self, filter: CategoryFilter, sort: SortMode) -> Vec<Task> {
        sort_tasks(&filter_by_category(&self.tasks, filter), sort)
    }

    /// Export document for the whole sequence.
    pub fn export_json(&self) -> Result<String, TransferError> {
        export_json(&self.tasks)
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&self) {
        match self.store.save(&self.tasks) {
            Ok(()) => debug!(
                "event=store_save module=collection status=ok tasks={}",
                self.tasks.len()
            ),
            Err(err) => error!(
                "event=store_save module=collection status=error tasks={} error={}",
                self.tasks.len(),
                err
            ),
        }
    }
}

fn log_import_rejected(err: &FormatError) {
    warn!("event=import_merge module=collection status=rejected error={err}");
}
