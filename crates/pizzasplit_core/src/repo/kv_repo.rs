//! Key-value store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist opaque string documents under fixed keys.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `put_value` replaces the whole document for a key.
//! - A failed `put_value` leaves the previous document in place.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage error for key-value and document codec operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(serde_json::Error),
    /// Stored document exists but does not have the expected shape.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize document: {err}"),
            Self::InvalidData(message) => write!(f, "invalid stored data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable string key-value storage.
pub trait KeyValueStore {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>>;
    fn put_value(&self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed key-value store over the `kv_store` table.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection returned by `db::open_db` / `db::open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put_value(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_value(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get_value(key)
    }

    fn put_value(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).put_value(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, SqliteKeyValueStore};
    use crate::db::open_db_in_memory;

    #[test]
    fn missing_key_reads_as_none() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKeyValueStore::new(&conn);
        assert_eq!(store.get_value("absent").unwrap(), None);
    }

    #[test]
    fn put_value_overwrites_existing_document() {
        let conn = open_db_in_memory().unwrap();
        let store = SqliteKeyValueStore::new(&conn);

        store.put_value("k", "first").unwrap();
        store.put_value("k", "second").unwrap();

        assert_eq!(store.get_value("k").unwrap().as_deref(), Some("second"));
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
