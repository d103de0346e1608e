//! Core task collection engine.
//! This crate is the single source of truth for task invariants.

pub mod db;
pub mod dictation;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod transfer;
pub mod view;

pub use dictation::backend::{CaptureError, RecognitionSegment, SpeechBackend};
pub use dictation::{
    DictationEvent, DictationNotice, DictationSession, DictationState, DictationTarget,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{RecordError, TaskRecord};
pub use model::task::{
    create_task, Category, NewTask, Priority, Task, TaskId, TaskValidationError,
};
pub use repo::json_store::JsonFileTaskStore;
pub use repo::sqlite_store::SqliteTaskStore;
pub use repo::task_store::{MemoryTaskStore, StoreError, StoreResult, TaskStore};
pub use service::collection::{ImportSummary, TaskCollection};
pub use service::merge::{merge_tasks, MergeSummary};
pub use transfer::{export_file_name, FormatError, TransferError};
pub use view::filter::{filter_by_category, CategoryFilter};
pub use view::sort::{sort_tasks, SortMode};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
