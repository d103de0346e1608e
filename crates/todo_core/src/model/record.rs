//! Ingress record shape and validation-with-defaults.
//!
//! # Responsibility
//! - Accept task-shaped records from stores and import payloads.
//! - Coerce missing or unknown optional fields to documented defaults.
//!
//! # Invariants
//! - `id` must be a non-empty string (integers are accepted and stringified).
//! - `title` must be a string with visible characters.
//! - Unknown `category` -> `Other`, unknown `priority` -> `Medium`.
//! - `dueDate` of `0` or `null` means no deadline.

use crate::model::task::{Category, Priority, Task, TaskId};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Loosely typed task record as found in stores and import files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, deserialize_with = "deserialize_label")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_label")]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<i64>,
}

impl TaskRecord {
    /// Converts a record into a canonical task, applying field defaults.
    ///
    /// # Errors
    /// - Returns `EmptyId` when the id is blank.
    /// - Returns `BlankTitle` when the title is empty after trimming.
    pub fn into_task(self) -> Result<Task, RecordError> {
        if self.id.trim().is_empty() {
            return Err(RecordError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(RecordError::BlankTitle);
        }

        Ok(Task {
            id: self.id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            created_at: self.created_at,
            category: self
                .category
                .as_deref()
                .and_then(Category::parse)
                .unwrap_or_default(),
            priority: self
                .priority
                .as_deref()
                .and_then(Priority::parse)
                .unwrap_or_default(),
            due_date: self.due_date.filter(|due| *due != 0),
        })
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            created_at: task.created_at,
            category: Some(task.category.as_str().to_string()),
            priority: Some(task.priority.as_str().to_string()),
            due_date: task.due_date,
        }
    }
}

/// Record-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    EmptyId,
    BlankTitle,
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::BlankTitle => write!(f, "task title must not be blank"),
        }
    }
}

impl Error for RecordError {}

fn deserialize_id<'de, D>(deserializer: D) -> Result<TaskId, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) if number.is_i64() || number.is_u64() => Ok(number.to_string()),
        other => Err(D::Error::custom(format!(
            "id must be a string, got {}",
            json_kind(&other)
        ))),
    }
}

// Non-string labels are treated as missing so they fall back to defaults.
fn deserialize_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

/// Short JSON type name for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordError, TaskRecord};
    use crate::model::task::{Category, Priority};
    use serde_json::json;

    #[test]
    fn missing_fields_take_defaults() {
        let record: TaskRecord = serde_json::from_value(json!({"id": "a", "title": "t"})).unwrap();
        let task = record.into_task().unwrap();

        assert!(!task.completed);
        assert_eq!(task.created_at, 0);
        assert_eq!(task.category, Category::Other);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn unknown_labels_and_zero_due_date_are_coerced() {
        let record: TaskRecord = serde_json::from_value(json!({
            "id": 17,
            "title": "t",
            "category": "hobby",
            "priority": 5,
            "dueDate": 0
        }))
        .unwrap();
        let task = record.into_task().unwrap();

        assert_eq!(task.id, "17");
        assert_eq!(task.category, Category::Other);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.due_date, None);
    }

    #[test]
    fn blank_id_is_rejected() {
        let record: TaskRecord = serde_json::from_value(json!({"id": " ", "title": "t"})).unwrap();
        assert_eq!(record.into_task().unwrap_err(), RecordError::EmptyId);
    }

    #[test]
    fn blank_title_is_rejected() {
        let record: TaskRecord =
            serde_json::from_value(json!({"id": "a", "title": "  \t"})).unwrap();
        assert_eq!(record.into_task().unwrap_err(), RecordError::BlankTitle);
    }

    #[test]
    fn boolean_id_fails_structurally() {
        let err = serde_json::from_value::<TaskRecord>(json!({"id": true, "title": "t"}))
            .unwrap_err();
        assert!(err.to_string().contains("id must be a string"), "{err}");
    }
}
