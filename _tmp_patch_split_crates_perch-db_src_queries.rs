use rusqlite::{Connection, OptionalExtension, params};

use perch_types::models::{Account, Message};

use crate::Database;
use crate::error::DbResult;

impl Database {
    // -- Accounts --

    /// Inserts a new account and returns it with the generated id. A taken
    /// username surfaces as `DbError::Unique` from the username index; there
    /// is no prior duplicate-check read.
    pub fn create_account(&self, username: &str, password: &str) -> DbResult<Account> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO accounts (username, password) VALUES (?1, ?2)",
                params![username, password],
            )?;
            Ok(Account {
                id: conn.last_insert_rowid(),
                username: username.to_string(),
                password: password.to_string(),
            })
        })
    }

    pub fn get_account_by_id(&self, id: i64) -> DbResult<Option<Account>> {
        self.with_conn(|conn| query_account_by_id(conn, id))
    }

    pub fn get_account_by_username(&self, username: &str) -> DbResult<Option<Account>> {
        self.with_conn(|conn| query_account_by_username(conn, username))
    }

    // -- Messages --

    /// Inserts a new message and returns it with the generated id.
    pub fn insert_message(&self, text: &str, posted_by: i64, posted_at: i64) -> DbResult<Message> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (message_text, posted_by, posted_at) VALUES (?1, ?2, ?3)",
                params![text, posted_by, posted_at],
            )?;
            Ok(Message {
                id: conn.last_insert_rowid(),
                message_text: text.to_string(),
                posted_by,
                posted_at,
            })
        })
    }

    pub fn get_message_by_id(&self, id: i64) -> DbResult<Option<Message>> {
        self.with_conn(|conn| query_message_by_id(conn, id))
    }

    pub fn get_all_messages(&self) -> DbResult<Vec<Message>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, message_text, posted_by, posted_at FROM messages ORDER BY id",
            )?;
            let rows = stmt
                .query_map([], message_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Messages for one poster, oldest first. Empty when the account has no
    /// messages or does not exist.
    pub fn get_messages_by_poster(&self, account_id: i64) -> DbResult<Vec<Message>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, message_text, posted_by, posted_at FROM messages
                 WHERE posted_by = ?1
                 ORDER BY id",
            )?;
            let rows = stmt
                .query_map([account_id], message_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Replaces the text of one message. Returns the number of rows changed:
    /// 0 means no message has that id.
    pub fn update_message_text(&self, id: i64, text: &str) -> DbResult<usize> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE messages SET message_text = ?2 WHERE id = ?1",
                params![id, text],
            )?;
            Ok(changed)
        })
    }

    /// Looks the message up first; when present, deletes it and returns the
    /// pre-deletion row. Absence performs no write.
    pub fn delete_message_by_id(&self, id: i64) -> DbResult<Option<Message>> {
        self.with_conn(|conn| {
            let existing = query_message_by_id(conn, id)?;
            if existing.is_some() {
                conn.execute("DELETE FROM messages WHERE id = ?1", [id])?;
            }
            Ok(existing)
        })
    }
}

fn query_account_by_id(conn: &Connection, id: i64) -> DbResult<Option<Account>> {
    let mut stmt = conn.prepare("SELECT id, username, password FROM accounts WHERE id = ?1")?;
    let row = stmt.query_row([id], account_from_row).optional()?;
    Ok(row)
}

fn query_account_by_username(conn: &Connection, username: &str) -> DbResult<Option<Account>> {
    let mut stmt =
        conn.prepare("SELECT id, username, password FROM accounts WHERE username = ?1")?;
    let row = stmt.query_row([username], account_from_row).optional()?;
    Ok(row)
}

fn query_message_by_id(conn: &Connection, id: i64) -> DbResult<Option<Message>> {
    let mut stmt = conn
        .prepare("SELECT id, message_text, posted_by, posted_at FROM messages WHERE id = ?1")?;
    let row = stmt.query_row([id], message_from_row).optional()?;
    Ok(row)
}

fn account_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

fn message_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        id: row.get(0)?,
        message_text: row.get(1)?,
        posted_by: row.get(2)?,
        posted_at: row.get(3)?,
    })
}
