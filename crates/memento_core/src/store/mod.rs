//! Key/value storage for encoded state tokens.
//!
//! # Responsibility
//! - Abstract the single-key local persistence the app needs.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - An absent key is `Ok(None)`, never an error.
//! - Keys must not be blank.

use crate::db::DbError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure.
#[derive(Debug)]
pub enum StoreError {
    BlankKey,
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankKey => write!(f, "state store key must not be blank"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::BlankKey => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::from(value))
    }
}

/// String key/value store.
pub trait StateStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes `key`; returns whether it existed.
    fn remove(&self, key: &str) -> StoreResult<bool>;
}

fn require_key(key: &str) -> StoreResult<()> {
    if key.trim().is_empty() {
        return Err(StoreError::BlankKey);
    }
    Ok(())
}

/// SQLite-backed store over the `kv_state` table.
pub struct SqliteStateStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateStore<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl StateStore for SqliteStateStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        require_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_state WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        require_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_state (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![key, value, Utc::now().timestamp_millis()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        require_key(key)?;
        let removed = self
            .conn
            .execute("DELETE FROM kv_state WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }
}

/// Process-local store for tests and hosts without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        require_key(key)?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        require_key(key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        require_key(key)?;
        Ok(self.entries.borrow_mut().remove(key).is_some())
    }
}
