use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;

use crate::{
    data_access_error::DataAccessError,
    schema::tasks,
    task::{NewTask, Task},
    task_priority::TaskPriority,
    task_status::TaskStatus,
};

/// A `tasks` row as stored. Timestamps are naive UTC.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskRow {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full rewrite of the mutable columns. `None` writes NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks, treat_none_as_null = true)]
pub struct TaskChangeset {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub due_date: Option<NaiveDateTime>,
    pub updated_at: NaiveDateTime,
}

impl NewTaskRow {
    /// Applies the creation defaults and stamps both timestamps with `now`.
    pub fn new(new_task: NewTask, now: DateTime<Utc>) -> Self {
        let NewTask {
            title,
            description,
            status,
            priority,
            due_date,
        } = new_task;

        NewTaskRow {
            title,
            description,
            status: status.unwrap_or_default().as_str().to_string(),
            priority: priority.unwrap_or_default().as_str().to_string(),
            due_date: due_date.map(|date| date.naive_utc()),
            created_at: now.naive_utc(),
            updated_at: now.naive_utc(),
        }
    }
}

impl From<&Task> for TaskChangeset {
    fn from(task: &Task) -> Self {
        TaskChangeset {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.as_str().to_string(),
            priority: task.priority.as_str().to_string(),
            due_date: task.due_date.map(|date| date.naive_utc()),
            updated_at: task.updated_at.naive_utc(),
        }
    }
}

impl TryFrom<TaskRow> for Task {
    type Error = DataAccessError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<TaskStatus>().map_err(|e| DataAccessError::CorruptRow {
            id: row.id,
            reason: e.to_string(),
        })?;
        let priority = row.priority.parse::<TaskPriority>().map_err(|e| DataAccessError::CorruptRow {
            id: row.id,
            reason: e.to_string(),
        })?;

        Ok(Task {
            id: row.id,
            title: row.title,
            description: row.description,
            status,
            priority,
            due_date: row.due_date.map(|date| date.and_utc()),
            created_at: row.created_at.and_utc(),
            updated_at: row.updated_at.and_utc(),
        })
    }
}
