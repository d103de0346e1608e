//! JSON import/export format.
//!
//! # Responsibility
//! - Parse import payloads into validated task batches.
//! - Serialize collections into the export format and name export files.
//!
//! # Invariants
//! - The top-level value must be a JSON array.
//! - Every element is validated before any is returned (all or nothing).
//! - Export writes camelCase task records, pretty-printed.

use crate::model::record::{json_kind, TaskRecord};
use crate::model::task::Task;
use chrono::NaiveDate;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{Read, Write};

const EXPORT_FILE_PREFIX: &str = "todos";

/// Malformed import payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Payload is not valid UTF-8 JSON.
    InvalidJson(String),
    /// Top-level value is not an array.
    NotAnArray { found: &'static str },
    /// One element is not a task-shaped record.
    InvalidRecord { index: usize, reason: String },
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(message) => write!(f, "import file is not valid JSON: {message}"),
            Self::NotAnArray { found } => write!(
                f,
                "import file must contain a JSON array of tasks, found {found}"
            ),
            Self::InvalidRecord { index, reason } => {
                write!(f, "task #{} in import file is malformed: {reason}", index + 1)
            }
        }
    }
}

impl Error for FormatError {}

/// Error for stream-level import/export.
#[derive(Debug)]
pub enum TransferError {
    Io(std::io::Error),
    Format(FormatError),
    Encode(serde_json::Error),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read or write task file: {err}"),
            Self::Format(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode tasks: {err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for TransferError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<FormatError> for TransferError {
    fn from(value: FormatError) -> Self {
        Self::Format(value)
    }
}

impl From<serde_json::Error> for TransferError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Validates a parsed JSON payload as a batch of tasks.
pub fn parse_import_value(value: Value) -> Result<Vec<Task>, FormatError> {
    let Value::Array(items) = value else {
        return Err(FormatError::NotAnArray {
            found: json_kind(&value),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| parse_record(index, item))
        .collect()
}

/// Parses raw import bytes (UTF-8 JSON) into a batch of tasks.
pub fn parse_import_bytes(bytes: &[u8]) -> Result<Vec<Task>, FormatError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|err| FormatError::InvalidJson(err.to_string()))?;
    parse_import_value(value)
}

/// Reads the whole stream, then parses it as an import payload.
pub fn read_import(mut reader: impl Read) -> Result<Vec<Task>, TransferError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(parse_import_bytes(&bytes)?)
}

/// Serializes tasks into the pretty-printed export document.
pub fn export_json(tasks: &[Task]) -> Result<String, TransferError> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Writes the export document to `writer`.
pub fn write_export(tasks: &[Task], mut writer: impl Write) -> Result<(), TransferError> {
    let document = export_json(tasks)?;
    writer.write_all(document.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Export file name for the given calendar date: `todos-YYYY-MM-DD.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{EXPORT_FILE_PREFIX}-{}.json", date.format("%Y-%m-%d"))
}

/// Export file name for today's UTC date.
pub fn export_file_name_today() -> String {
    export_file_name(chrono::Utc::now().date_naive())
}

fn parse_record(index: usize, item: Value) -> Result<Task, FormatError> {
    if !item.is_object() {
        return Err(FormatError::InvalidRecord {
            index,
            reason: format!("expected an object, found {}", json_kind(&item)),
        });
    }

    let record: TaskRecord =
        serde_json::from_value(item).map_err(|err| FormatError::InvalidRecord {
            index,
            reason: err.to_string(),
        })?;
    record.into_task().map_err(|err| FormatError::InvalidRecord {
        index,
        reason: err.to_string(),
    })
}
