//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per aggregate.
//! - Isolate SQLite query details from request handling.
//!
//! # Invariants
//! - Every value reaches SQL as a bound parameter.
//! - Write operations commit exactly once; a failed write rolls back fully.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod article_repo;
pub mod cycle_repo;
pub mod daily_note_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
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
