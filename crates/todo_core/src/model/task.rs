//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record and its closed category/priority sets.
//! - Stamp identity and creation time when a user submission becomes a task.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `title` of a freshly created task is trimmed and non-empty.
//! - Wire labels for category/priority match files written by earlier
//!   releases (`工作|学习|生活|其他`, `高|中|低`).

use crate::model::record::{RecordError, TaskRecord};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a task inside one collection.
///
/// Kept as a plain string so ids produced by older exports stay valid.
pub type TaskId = String;

/// Closed set of task categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "工作", alias = "work")]
    Work,
    #[serde(rename = "学习", alias = "study")]
    Study,
    #[serde(rename = "生活", alias = "life")]
    Life,
    /// Fallback for missing or unknown labels.
    #[default]
    #[serde(rename = "其他", alias = "other")]
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [Self::Work, Self::Study, Self::Life, Self::Other];

    /// Label written to JSON exports and the blob store.
    pub fn wire_label(self) -> &'static str {
        match self {
            Self::Work => "工作",
            Self::Study => "学习",
            Self::Life => "生活",
            Self::Other => "其他",
        }
    }

    /// Stable ASCII key used in SQLite rows and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Study => "study",
            Self::Life => "life",
            Self::Other => "other",
        }
    }

    /// Parses either the wire label or the ASCII key.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "工作" | "work" => Some(Self::Work),
            "学习" | "study" => Some(Self::Study),
            "生活" | "life" => Some(Self::Life),
            "其他" | "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered task priority, `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "高", alias = "high")]
    High,
    #[default]
    #[serde(rename = "中", alias = "medium")]
    Medium,
    #[serde(rename = "低", alias = "low")]
    Low,
}

impl Priority {
    /// Numeric weight; larger sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn wire_label(self) -> &'static str {
        match self {
            Self::High => "高",
            Self::Medium => "中",
            Self::Low => "低",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "高" | "high" => Some(Self::High),
            "中" | "medium" => Some(Self::Medium),
            "低" | "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical to-do record.
///
/// Deserialization goes through [`TaskRecord`], so unknown labels are coerced
/// to defaults and structurally broken records are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TaskRecord")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub category: Category,
    pub priority: Priority,
    /// Unix epoch milliseconds; `None` means no deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
}

impl Task {
    /// Builds a task from a user submission with caller-provided identity.
    ///
    /// # Errors
    /// - Returns `BlankTitle` when the title is empty after trimming.
    pub fn create(
        request: NewTask,
        id: impl Into<TaskId>,
        created_at: i64,
    ) -> Result<Self, TaskValidationError> {
        let title = request.title.trim();
        if title.is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }

        let description = request
            .description
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        Ok(Self {
            id: id.into(),
            title: title.to_string(),
            description,
            completed: false,
            created_at,
            category: request.category,
            priority: request.priority,
            due_date: request.due_date.filter(|due| *due != 0),
        })
    }

    /// Flips completion state.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Derived display flag: still open and past its deadline at `now_ms`.
    pub fn is_overdue(&self, now_ms: i64) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now_ms)
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = RecordError;

    fn try_from(value: TaskRecord) -> Result<Self, Self::Error> {
        value.into_task()
    }
}

/// User submission for a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub priority: Priority,
    pub due_date: Option<i64>,
}

impl NewTask {
    /// Submission with the given title and default fields.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Validation errors for task creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    BlankTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// Creates a task stamped with a fresh id and the current wall-clock time.
///
/// Ids are UUIDv7: millisecond timestamp prefix plus random tail, so two
/// submissions in the same millisecond still get distinct ids.
pub fn create_task(request: NewTask) -> Result<Task, TaskValidationError> {
    Task::create(request, generate_task_id(), now_epoch_ms())
}

/// Returns a new time-ordered, collision-resistant task id.
pub fn generate_task_id() -> TaskId {
    Uuid::now_v7().to_string()
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
