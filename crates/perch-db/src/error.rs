use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    /// An insert or update hit a UNIQUE constraint. The schema's only unique
    /// column is accounts.username.
    #[error("unique constraint violation: {0}")]
    Unique(String),

    #[error("database lock poisoned")]
    Poisoned,

    #[error(transparent)]
    Sqlite(rusqlite::Error),
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(cause, message)
                if cause.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                DbError::Unique(message.clone().unwrap_or_default())
            }
            _ => DbError::Sqlite(err),
        }
    }
}
