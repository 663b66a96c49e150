//! SQLite Store
//!
//! `rusqlite`-backed implementation of [`TodoStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;

use crate::domain::{DomainError, DomainResult, ListId, NewTask, Task, TaskId, TaskList};
use super::db::{init_db, init_memory_db, DbState};
use super::traits::TodoStore;

const TASK_COLUMNS: &str = "id, task, completed, list_id, date";

/// SQLite implementation of the store
pub struct SqliteStore {
    db: DbState,
}

impl SqliteStore {
    /// Open (creating if needed) a database file
    pub fn open(path: &Path) -> DomainResult<Self> {
        Ok(Self { db: init_db(path)? })
    }

    /// Private database that disappears on close
    pub fn open_in_memory() -> DomainResult<Self> {
        Ok(Self { db: init_memory_db()? })
    }
}

#[async_trait]
impl TodoStore for SqliteStore {
    async fn insert_list(&self, name: &str) -> DomainResult<ListId> {
        self.db
            .with_conn(|conn| {
                let tx = conn.transaction()?;
                tx.execute("INSERT INTO todo_lists (name) VALUES (?1)", params![name])?;
                let id = last_id(&tx)?;
                tx.commit()?;
                Ok(id)
            })
            .await
    }

    async fn insert_task(&self, task: &NewTask) -> DomainResult<TaskId> {
        self.db
            .with_conn(|conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    "INSERT INTO todos (task, completed, list_id) VALUES (?1, 0, ?2)",
                    params![task.task, task.list_id],
                )?;
                let id = last_id(&tx)?;
                tx.commit()?;
                Ok(id)
            })
            .await
    }

    async fn set_task_completed(&self, id: TaskId, completed: bool) -> DomainResult<bool> {
        self.db
            .with_conn(|conn| {
                let changed = conn.execute(
                    "UPDATE todos SET completed = ?1 WHERE id = ?2",
                    params![completed, id],
                )?;
                Ok(changed > 0)
            })
            .await
    }

    async fn delete_task(&self, id: TaskId) -> DomainResult<()> {
        self.db
            .with_conn(|conn| {
                conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
                Ok(())
            })
            .await
    }

    async fn delete_list(&self, id: ListId) -> DomainResult<()> {
        self.db
            .with_conn(|conn| {
                conn.execute("DELETE FROM todo_lists WHERE id = ?1", params![id])?;
                Ok(())
            })
            .await
    }

    async fn delete_tasks_in_list(&self, list_id: ListId) -> DomainResult<usize> {
        self.db
            .with_conn(|conn| {
                Ok(conn.execute("DELETE FROM todos WHERE list_id = ?1", params![list_id])?)
            })
            .await
    }

    async fn delete_list_with_tasks(&self, id: ListId) -> DomainResult<usize> {
        self.db
            .with_conn(|conn| {
                let tx = conn.transaction()?;
                tx.execute("DELETE FROM todo_lists WHERE id = ?1", params![id])?;
                let removed = tx.execute("DELETE FROM todos WHERE list_id = ?1", params![id])?;
                tx.commit()?;
                Ok(removed)
            })
            .await
    }

    async fn find_task(&self, id: TaskId) -> DomainResult<Option<Task>> {
        self.db
            .with_conn(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM todos WHERE id = ?1",
                    TASK_COLUMNS
                ))?;
                let mut rows = stmt.query_map(params![id], row_to_task)?;
                Ok(rows.next().transpose()?)
            })
            .await
    }

    async fn lists(&self) -> DomainResult<Vec<TaskList>> {
        self.db
            .with_conn(|conn| {
                let mut stmt = conn.prepare("SELECT id, name FROM todo_lists ORDER BY id ASC")?;
                let lists = stmt
                    .query_map([], |row| Ok(TaskList { id: row.get(0)?, name: row.get(1)? }))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(lists)
            })
            .await
    }

    async fn tasks(&self) -> DomainResult<Vec<Task>> {
        self.db
            .with_conn(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM todos ORDER BY id ASC",
                    TASK_COLUMNS
                ))?;
                let tasks = stmt
                    .query_map([], row_to_task)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(tasks)
            })
            .await
    }

    async fn tasks_in_list(&self, list_id: ListId) -> DomainResult<Vec<Task>> {
        self.db
            .with_conn(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM todos WHERE list_id = ?1 ORDER BY id ASC",
                    TASK_COLUMNS
                ))?;
                let tasks = stmt
                    .query_map(params![list_id], row_to_task)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(tasks)
            })
            .await
    }

    async fn close(&self) -> DomainResult<()> {
        self.db.close().await
    }
}

fn last_id(conn: &Connection) -> DomainResult<u32> {
    let rowid = conn.last_insert_rowid();
    u32::try_from(rowid).map_err(|_| DomainError::Internal(format!("row id {} out of range", rowid)))
}

/// Convert a database row to Task
fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let date: Option<i64> = row.get(4)?;
    Ok(Task {
        id: row.get(0)?,
        task: row.get(1)?,
        completed: row.get::<_, i64>(2)? != 0,
        list_id: row.get(3)?,
        date: date.and_then(DateTime::<Utc>::from_timestamp_millis),
    })
}
