//! SQLite-backed task store.
//!
//! # Responsibility
//! - Persist the canonical sequence into the `tasks` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `position` mirrors the canonical sequence order.
//! - Saves replace the table contents in one transaction.
//! - Category/priority are stored as ASCII keys; unknown keys are coerced on load.

use crate::model::record::TaskRecord;
use crate::model::task::Task;
use crate::repo::task_store::{StoreError, StoreResult, TaskStore};
use rusqlite::{params, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    completed,
    created_at,
    category,
    priority,
    due_date
FROM tasks
ORDER BY position ASC";

/// Task store over a migrated SQLite connection.
pub struct SqliteTaskStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskStore<'conn> {
    /// Constructs a store from a connection returned by `db::open_db*`.
    ///
    /// # Errors
    /// - Returns `InvalidData` when the `tasks` table is missing.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'tasks'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(StoreError::InvalidData(
                "tasks table is missing; open the database through db::open_db".to_string(),
            ));
        }
        Ok(Self { conn })
    }
}

impl TaskStore for SqliteTaskStore<'_> {
    fn load(&self) -> StoreResult<Vec<TaskRecord>> {
        let mut stmt = self.conn.prepare(TASK_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_task_row(row)?);
        }

        Ok(records)
    }

    fn save(&self, tasks: &[Task]) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM tasks;", [])?;
        {
            let mut insert = tx.prepare(
                "INSERT INTO tasks (
                    position,
                    id,
                    title,
                    description,
                    completed,
                    created_at,
                    category,
                    priority,
                    due_date
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            )?;
            for (position, task) in tasks.iter().enumerate() {
                insert.execute(params![
                    position as i64,
                    task.id.as_str(),
                    task.title.as_str(),
                    task.description.as_deref(),
                    bool_to_int(task.completed),
                    task.created_at,
                    task.category.as_str(),
                    task.priority.as_str(),
                    task.due_date,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<TaskRecord> {
    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    Ok(TaskRecord {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        completed,
        created_at: row.get("created_at")?,
        category: row.get("category")?,
        priority: row.get("priority")?,
        due_date: row.get("due_date")?,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
