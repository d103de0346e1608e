//! JSON blob file store.
//!
//! # Responsibility
//! - Persist the whole task sequence as one JSON document on disk.
//!
//! # Invariants
//! - A missing file loads as an empty sequence.
//! - Saves write a sibling temp file and rename it over the target, so a
//!   failed write never truncates the previous document.

use crate::model::record::TaskRecord;
use crate::model::task::Task;
use crate::repo::task_store::{StoreResult, TaskStore};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default blob file name, mirroring the historical storage key `todos`.
pub const DEFAULT_BLOB_FILE_NAME: &str = "todos.json";

/// Store that keeps the sequence in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileTaskStore {
    path: PathBuf,
}

impl JsonFileTaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/todos.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_BLOB_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskStore for JsonFileTaskStore {
    fn load(&self) -> StoreResult<Vec<TaskRecord>> {
        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("event=store_load module=store status=empty backend=json");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        Ok(serde_json::from_slice(&content)?)
    }

    fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let document = serde_json::to_vec(tasks)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, document)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}
