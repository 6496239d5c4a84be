//! SQLite connection pool.
//!
//! A single mutex-guarded connection is enough for the user table: every
//! query here is a point lookup or a small insert, and the lock is never
//! held across an await point (all query functions are synchronous).

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use thiserror::Error;

/// Database error types.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Connection(#[from] rusqlite::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    Duplicate(String),

    #[error("Database lock poisoned")]
    Poisoned,
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Shared handle to the SQLite database.
///
/// Clone freely; clones share the same underlying connection.
#[derive(Clone)]
pub struct DbPool {
    conn: Arc<Mutex<Connection>>,
}

impl DbPool {
    /// Open (or create) a database file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory database, used by tests.
    pub fn in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure with shared access to the connection.
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> DbResult<T>) -> DbResult<T> {
        let guard = self.conn.lock().map_err(|_| DbError::Poisoned)?;
        f(&guard)
    }

    /// Run a closure with exclusive access to the connection.
    pub fn with_conn_mut<T>(&self, f: impl FnOnce(&mut Connection) -> DbResult<T>) -> DbResult<T> {
        let mut guard = self.conn.lock().map_err(|_| DbError::Poisoned)?;
        f(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_roundtrip() {
        let pool = DbPool::in_memory().unwrap();
        pool.with_conn(|conn| {
            conn.execute("CREATE TABLE t (x INTEGER)", [])?;
            conn.execute("INSERT INTO t (x) VALUES (42)", [])?;
            let x: i64 = conn.query_row("SELECT x FROM t", [], |row| row.get(0))?;
            assert_eq!(x, 42);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_clone_shares_connection() {
        let pool = DbPool::in_memory().unwrap();
        pool.with_conn(|conn| {
            conn.execute("CREATE TABLE t (x INTEGER)", [])?;
            Ok(())
        })
        .unwrap();

        let clone = pool.clone();
        clone
            .with_conn(|conn| {
                conn.execute("INSERT INTO t (x) VALUES (1)", [])?;
                Ok(())
            })
            .unwrap();
    }
}
