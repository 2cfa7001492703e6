//! Cycle repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Listing returns at most [`RECENT_CYCLES_LIMIT`] rows, newest start first.
//! - Start dates are validated as calendar dates by the schema, not here.

use crate::model::cycle::{Cycle, CycleId, NewCycle};
use crate::model::user::UserId;
use crate::repo::RepoResult;
use rusqlite::{params, Connection, Row, TransactionBehavior};

/// Fixed window returned by cycle listing.
pub const RECENT_CYCLES_LIMIT: u32 = 10;

pub trait CycleRepository {
    fn add_cycle(&mut self, cycle: &NewCycle) -> RepoResult<CycleId>;
    /// Lists the most recent cycles of one user by `start_date DESC`.
    fn list_recent_cycles(&self, user_id: UserId) -> RepoResult<Vec<Cycle>>;
}

pub struct SqliteCycleRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteCycleRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl CycleRepository for SqliteCycleRepository<'_> {
    fn add_cycle(&mut self, cycle: &NewCycle) -> RepoResult<CycleId> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let cycle_id: CycleId = tx.query_row(
            "INSERT INTO cycles (user_id, start_date)
             VALUES (?1, ?2)
             RETURNING id;",
            params![cycle.user_id, cycle.start_date.as_str()],
            |row| row.get(0),
        )?;
        tx.commit()?;
        Ok(cycle_id)
    }

    fn list_recent_cycles(&self, user_id: UserId) -> RepoResult<Vec<Cycle>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                user_id,
                start_date,
                created_at
             FROM cycles
             WHERE user_id = ?1
             ORDER BY start_date DESC, id DESC
             LIMIT ?2;",
        )?;
        let mut rows = stmt.query(params![user_id, i64::from(RECENT_CYCLES_LIMIT)])?;
        let mut cycles = Vec::new();
        while let Some(row) = rows.next()? {
            cycles.push(parse_cycle_row(row)?);
        }
        Ok(cycles)
    }
}

fn parse_cycle_row(row: &Row<'_>) -> RepoResult<Cycle> {
    Ok(Cycle {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        start_date: row.get("start_date")?,
        created_at: row.get("created_at")?,
    })
}
