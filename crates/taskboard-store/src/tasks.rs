use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use taskboard_core::ids::TaskId;

use crate::database::Database;
use crate::error::StoreError;
use crate::row_helpers;

/// A stored task. Field names serialize to the camelCase wire names,
/// which are also the column names.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRow {
    pub id: TaskId,
    pub task_title: String,
    pub description: Option<String>,
    pub date_due: Option<String>,
    pub status: Option<String>,
    pub created_date: String,
}

/// The four client-mutable fields of a task.
///
/// All optional: an omitted field is written as NULL. Update is a full
/// replace of these four columns, not a sparse patch — callers resend
/// unchanged fields. A missing title surfaces as the column's NOT NULL
/// constraint, not as a validation error.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub task_title: Option<String>,
    pub description: Option<String>,
    pub date_due: Option<String>,
    pub status: Option<String>,
}

pub struct TaskRepo {
    db: Database,
}

impl TaskRepo {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a new task. The id and createdDate are assigned here and are
    /// immutable from then on; client-supplied values never reach this point.
    #[instrument(skip(self, fields))]
    pub fn create(&self, fields: TaskFields) -> Result<TaskRow, StoreError> {
        let id = TaskId::new();
        let now = Utc::now().to_rfc3339();

        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (id, taskTitle, description, dateDue, status, createdDate)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    id.as_str(),
                    fields.task_title,
                    fields.description,
                    fields.date_due,
                    fields.status,
                    now,
                ],
            )?;

            Ok(TaskRow {
                id: id.clone(),
                // The insert enforces NOT NULL, so a missing title never gets here.
                task_title: fields.task_title.clone().unwrap_or_default(),
                description: fields.description.clone(),
                date_due: fields.date_due.clone(),
                status: fields.status.clone(),
                created_date: now.clone(),
            })
        })
    }

    /// List all tasks in natural scan order.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<TaskRow>, StoreError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, taskTitle, description, dateDue, status, createdDate FROM tasks",
            )?;
            let mut rows = stmt.query([])?;
            let mut results = Vec::new();
            while let Some(row) = rows.next()? {
                results.push(row_to_task(row)?);
            }
            Ok(results)
        })
    }

    /// Overwrite the four mutable fields of a task. The id and createdDate
    /// columns are never touched.
    #[instrument(skip(self, fields), fields(task_id = %id))]
    pub fn update(&self, id: &TaskId, fields: TaskFields) -> Result<(), StoreError> {
        self.db.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE tasks SET taskTitle = ?1, description = ?2, dateDue = ?3, status = ?4
                 WHERE id = ?5",
                rusqlite::params![
                    fields.task_title,
                    fields.description,
                    fields.date_due,
                    fields.status,
                    id.as_str(),
                ],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound(format!("task {id}")));
            }
            Ok(())
        })
    }

    /// Delete a task (hard delete).
    #[instrument(skip(self), fields(task_id = %id))]
    pub fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        self.db.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", [id.as_str()])?;
            if changed == 0 {
                return Err(StoreError::NotFound(format!("task {id}")));
            }
            Ok(())
        })
    }
}

fn row_to_task(row: &rusqlite::Row<'_>) -> Result<TaskRow, StoreError> {
    Ok(TaskRow {
        id: TaskId::from_raw(row_helpers::get::<String>(row, 0, "tasks", "id")?),
        task_title: row_helpers::get(row, 1, "tasks", "taskTitle")?,
        description: row_helpers::get_opt(row, 2, "tasks", "description")?,
        date_due: row_helpers::get_opt(row, 3, "tasks", "dateDue")?,
        status: row_helpers::get_opt(row, 4, "tasks", "status")?,
        created_date: row_helpers::get(row, 5, "tasks", "createdDate")?,
    })
}
