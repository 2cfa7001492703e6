//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations atomically, once per database file.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Uniqueness on `(user_id, goal_type)` and `(user_id, note_date)` backs the
//!   insert-or-skip and upsert semantics of the repositories.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_users.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_tracking.sql"),
    },
];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
///
/// Concurrent first opens of one file are serialized by an immediate
/// transaction; the version is re-read under that lock so only one
/// connection runs the migration scripts.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let latest = latest_version();
    if ensure_supported(current_user_version(conn)?, latest)? {
        return Ok(());
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let current_version = current_user_version(&tx)?;
    if ensure_supported(current_version, latest)? {
        return Ok(());
    }

    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={current_version} to_version={latest}"
    );
    Ok(())
}

/// Returns `true` when the schema is already current.
fn ensure_supported(current_version: u32, latest: u32) -> DbResult<bool> {
    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }
    Ok(current_version == latest)
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
