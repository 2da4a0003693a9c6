//! SQLite-backed persistence for todo items.
//!
//! # Design
//! `TodoStore` wraps one `tokio_rusqlite::Connection`. Statements run on the
//! connection's background thread, so handlers can await them without
//! blocking the runtime, and concurrent callers are serialized there.
//! Each public operation issues exactly one SQL statement.
//!
//! Rows are addressed through `rowid`. Tables created here alias it with an
//! `AUTOINCREMENT` primary key so ids are never handed out twice; tables left
//! behind by the older `todos(description, completed)` schema still work.

use std::path::Path;
use std::sync::Arc;

use rusqlite::{params, OptionalExtension};
use tokio_rusqlite::Connection;

use crate::error::StoreError;
use crate::types::Todo;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT,
    completed BOOLEAN
)";

/// Shared handle to the todo table. Clones share the same connection.
#[derive(Clone)]
pub struct TodoStore {
    conn: Arc<Connection>,
}

impl TodoStore {
    /// Open (or create) the database file at `path` and ensure the table exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open(&path)
            .await
            .map_err(|e| StoreError::storage("open", e))?;
        let store = Self::init(conn).await?;
        tracing::info!(path = %path.display(), "todo store opened");
        Ok(store)
    }

    /// Open a private in-memory database. Contents vanish with the last handle.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| StoreError::storage("open", e))?;
        Self::init(conn).await
    }

    async fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.call(|conn| {
            conn.execute_batch(CREATE_TABLE)?;
            Ok(())
        })
        .await
        .map_err(|e: tokio_rusqlite::Error<rusqlite::Error>| StoreError::storage("init", e))?;
        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    /// All todos in storage order.
    pub async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare("SELECT rowid, description, completed FROM todos")?;
                let todos = stmt
                    .query_map([], |row| {
                        Ok(Todo {
                            id: row.get(0)?,
                            description: row.get(1)?,
                            completed: row.get(2)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(todos)
            })
            .await
            .map_err(|e: tokio_rusqlite::Error<rusqlite::Error>| StoreError::storage("list", e))
    }

    /// The todo with `id`, or `StoreError::NotFound`.
    pub async fn get(&self, id: i64) -> Result<Todo, StoreError> {
        let todo = self
            .conn
            .call(move |conn| {
                conn.query_row(
                    "SELECT rowid, description, completed FROM todos WHERE rowid = ?1",
                    params![id],
                    |row| {
                        Ok(Todo {
                            id: row.get(0)?,
                            description: row.get(1)?,
                            completed: row.get(2)?,
                        })
                    },
                )
                .optional()
            })
            .await
            .map_err(|e: tokio_rusqlite::Error<rusqlite::Error>| {
                StoreError::storage("get", format!("todo {id}: {e}"))
            })?;
        todo.ok_or(StoreError::NotFound(id))
    }

    /// Insert a new todo and return its assigned id. `todo.id` is ignored.
    pub async fn create(&self, todo: &Todo) -> Result<i64, StoreError> {
        let description = todo.description.clone();
        let completed = todo.completed;
        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO todos (description, completed) VALUES (?1, ?2)",
                    params![description, completed],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e: tokio_rusqlite::Error<rusqlite::Error>| StoreError::storage("create", e))?;
        tracing::debug!(id, "todo created");
        Ok(id)
    }

    /// Replace description and completion flag of the row with `todo.id`.
    ///
    /// Succeeds without effect when no such row exists.
    pub async fn update(&self, todo: &Todo) -> Result<(), StoreError> {
        let Todo {
            id,
            description,
            completed,
        } = todo.clone();
        let changed = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "UPDATE todos SET description = ?1, completed = ?2 WHERE rowid = ?3",
                    params![description, completed, id],
                )
            })
            .await
            .map_err(|e: tokio_rusqlite::Error<rusqlite::Error>| {
                StoreError::storage("update", format!("todo {id}: {e}"))
            })?;
        tracing::debug!(id, changed, "todo updated");
        Ok(())
    }

    /// Remove the row with `id`. Succeeds without effect when no such row exists.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let changed = self
            .conn
            .call(move |conn| conn.execute("DELETE FROM todos WHERE rowid = ?1", params![id]))
            .await
            .map_err(|e: tokio_rusqlite::Error<rusqlite::Error>| {
                StoreError::storage("delete", format!("todo {id}: {e}"))
            })?;
        tracing::debug!(id, changed, "todo deleted");
        Ok(())
    }

    /// Close the connection if this is the last handle.
    ///
    /// Returns `Ok(true)` once the connection is closed. While other clones are
    /// alive this handle is only dropped, a warning is logged and `Ok(false)`
    /// is returned; the connection then closes when the last clone drops.
    pub async fn close(self) -> Result<bool, StoreError> {
        match Arc::try_unwrap(self.conn) {
            Ok(conn) => {
                conn.close()
                    .await
                    .map_err(|e| StoreError::storage("close", e))?;
                tracing::info!("todo store closed");
                Ok(true)
            }
            Err(conn) => {
                tracing::warn!(
                    other_handles = Arc::strong_count(&conn) - 1,
                    "todo store still shared at close, leaving connection to last handle"
                );
                Ok(false)
            }
        }
    }
}
