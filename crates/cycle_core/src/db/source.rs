//! Per-request connection acquisition.
//!
//! # Invariants
//! - Every call to [`ConnectionSource::acquire`] yields a fresh, owned,
//!   migrated connection; nothing is cached between calls.
//! - Callers release the connection by dropping it.

use super::open::open_db;
use super::DbResult;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Provider of one exclusive storage connection per request.
///
/// A pooled provider can implement this without changing callers.
pub trait ConnectionSource {
    fn acquire(&self) -> DbResult<Connection>;
}

impl<S: ConnectionSource + ?Sized> ConnectionSource for &S {
    fn acquire(&self) -> DbResult<Connection> {
        (**self).acquire()
    }
}

/// Opens the configured SQLite file on every acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteFileSource {
    path: PathBuf,
}

impl SqliteFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConnectionSource for SqliteFileSource {
    fn acquire(&self) -> DbResult<Connection> {
        open_db(&self.path)
    }
}
