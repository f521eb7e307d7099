use diesel::{
    connection::SimpleConnection,
    prelude::*,
    r2d2::{ConnectionManager, CustomizeConnection, Pool},
    sqlite::Sqlite,
};

use crate::{
    data_access_error::DataAccessError,
    schema::tasks,
    task::{Task, TaskId},
    task_filter::TaskFilter,
    task_row::{NewTaskRow, TaskChangeset, TaskRow},
};

pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

// AUTOINCREMENT keeps SQLite from handing out the id of a deleted row again.
const CREATE_TASKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    title VARCHAR(255) NOT NULL,
    description TEXT,
    status VARCHAR(20) NOT NULL DEFAULT 'pending',
    priority VARCHAR(20) NOT NULL DEFAULT 'medium',
    due_date TIMESTAMP,
    created_at TIMESTAMP NOT NULL,
    updated_at TIMESTAMP NOT NULL
)";
const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks (created_at)";

#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute("PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Handle to the task store. Cheap to clone; all clones share one pool.
#[derive(Clone)]
pub struct DataContext {
    pool: SqlitePool,
}

impl DataContext {
    /// Opens (or creates) the database and makes sure the `tasks` table exists.
    pub fn new(database_url: &str, max_connections: u32) -> Result<Self, DataAccessError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_connections.max(1))
            .connection_customizer(Box::new(SqlitePragmas))
            .build(manager)?;

        let mut connection = pool.get()?;
        connection.batch_execute(CREATE_TASKS_TABLE)?;
        connection.batch_execute(CREATE_CREATED_AT_INDEX)?;

        tracing::debug!(database_url, max_connections, "task store ready");
        Ok(DataContext { pool })
    }

    /// A private in-memory database. Every SQLite connection to `:memory:`
    /// sees its own database, so the pool holds exactly one.
    pub fn in_memory() -> Result<Self, DataAccessError> {
        DataContext::new(":memory:", 1)
    }

    async fn run_blocking<F, T>(&self, f: F) -> Result<T, DataAccessError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, DataAccessError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get()?;
            f(&mut connection)
        })
        .await?
    }

    pub async fn insert_task(&self, row: NewTaskRow) -> Result<Task, DataAccessError> {
        self.run_blocking(move |connection| {
            let stored = diesel::insert_into(tasks::table)
                .values(&row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)?;
            Task::try_from(stored)
        })
        .await
    }

    pub async fn get_task(&self, id: TaskId) -> Result<Option<Task>, DataAccessError> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id)
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(Task::try_from).transpose()
        })
        .await
    }

    /// One page of matching tasks, newest first, plus the total match count.
    pub async fn list_tasks(
        &self,
        filter: TaskFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Task>, i64), DataAccessError> {
        self.run_blocking(move |connection| {
            let total_items = filtered_tasks(filter)
                .count()
                .get_result::<i64>(connection)?;
            let rows = filtered_tasks(filter)
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .limit(limit)
                .offset(offset)
                .load::<TaskRow>(connection)?;

            let tasks = rows
                .into_iter()
                .map(Task::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            Ok((tasks, total_items))
        })
        .await
    }

    /// Writes every mutable column of `task`. `None` if the row is gone.
    pub async fn save_task(&self, task: &Task) -> Result<Option<Task>, DataAccessError> {
        let id = task.id;
        let changes = TaskChangeset::from(task);
        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.find(id))
                .set(&changes)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()?;
            row.map(Task::try_from).transpose()
        })
        .await
    }

    pub async fn delete_task(&self, id: TaskId) -> Result<bool, DataAccessError> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id)).execute(connection)?;
            Ok(deleted > 0)
        })
        .await
    }
}

fn filtered_tasks(filter: TaskFilter) -> tasks::BoxedQuery<'static, Sqlite> {
    let TaskFilter { status, priority } = filter;
    let mut query = tasks::table.into_boxed();
    if let Some(status) = status {
        query = query.filter(tasks::status.eq(status.as_str()));
    }
    if let Some(priority) = priority {
        query = query.filter(tasks::priority.eq(priority.as_str()));
    }
    query
}
