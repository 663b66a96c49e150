//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations.

use log::info;
use rusqlite::Connection;
use std::path::Path;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Database state wrapper; `None` once closed
pub struct DbState {
    conn: Mutex<Option<Connection>>,
}

impl DbState {
    fn new(conn: Connection) -> Self {
        Self { conn: Mutex::new(Some(conn)) }
    }

    /// Run `f` against the open connection; fails after `close`
    pub async fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> DomainResult<T>,
    ) -> DomainResult<T> {
        let mut guard = self.conn.lock().await;
        let conn = guard.as_mut().ok_or(DomainError::Closed)?;
        f(conn)
    }

    pub async fn close(&self) -> DomainResult<()> {
        let conn = self.conn.lock().await.take();
        if let Some(conn) = conn {
            conn.close().map_err(|(_, e)| DomainError::from(e))?;
            info!("sqlite connection closed");
        }
        Ok(())
    }
}

/// Initialize database with path
pub fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = Connection::open(db_path)?;
    info!("opened sqlite database at {}", db_path.display());
    setup(conn)
}

/// Initialize a private in-memory database
pub fn init_memory_db() -> DomainResult<DbState> {
    let conn = Connection::open_in_memory()?;
    info!("opened in-memory sqlite database");
    setup(conn)
}

fn setup(conn: Connection) -> DomainResult<DbState> {
    run_migrations(&conn)?;
    Ok(DbState::new(conn))
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS todo_lists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS todos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            task TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            list_id INTEGER
        )",
        [],
    )?;

    // Early databases predate the date column
    if !column_exists(conn, "todos", "date")? {
        conn.execute("ALTER TABLE todos ADD COLUMN date INTEGER", [])?;
        info!("migrated todos: added date column");
    }

    // Index for per-list reads and cascade deletes
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_todos_list ON todos(list_id)",
        [],
    )?;

    Ok(())
}
