//! SQLite bootstrap for the local state store.
//!
//! # Responsibility
//! - Open state databases and bring their `kv_state` schema up to date.
//! - Classify SQLite failures so stores can tell rejected writes from I/O.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - No state is read or written before migrations succeed.
//! - Writes refused by a schema constraint or trigger surface as
//!   `DbError::ConstraintViolation`, never as a bare `Sqlite` error.

use rusqlite::ErrorCode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// State database failure.
#[derive(Debug)]
pub enum DbError {
    /// Any SQLite failure not covered by a more specific variant.
    Sqlite(rusqlite::Error),
    /// A `kv_state` check or trigger refused the write, e.g. a blank key.
    ConstraintViolation(rusqlite::Error),
    /// The file was written by a newer build than this one.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Whether the failure was a refused write rather than an I/O fault.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "state database error: {err}"),
            Self::ConstraintViolation(err) => {
                write!(f, "state database rejected write: {err}")
            }
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "state database schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::ConstraintViolation(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        match value.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => Self::ConstraintViolation(value),
            _ => Self::Sqlite(value),
        }
    }
}
