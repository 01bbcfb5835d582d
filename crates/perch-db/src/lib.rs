pub mod error;
pub mod migrations;
pub mod queries;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::info;

pub use error::{DbError, DbResult};

/// Shared storage handle hosting the account directory and the message store.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database with the same schema, for tests.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Runs `f` while holding the connection guard, so every statement inside
    /// one call is atomic with respect to other handlers.
    pub fn with_conn<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::Poisoned)?;
        f(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reopen_preserves_rows_and_reruns_migrations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perch.db");

        let id = {
            let db = Database::open(&path).unwrap();
            db.create_account("alice", "pass1").unwrap().id
        };

        let db = Database::open(&path).unwrap();
        let account = db.get_account_by_id(id).unwrap().unwrap();
        assert_eq!(account.username, "alice");
    }
}
