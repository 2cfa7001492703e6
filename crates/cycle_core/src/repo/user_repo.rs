//! User/goal repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Create users together with their goal set in one transaction.
//! - Load users with their goals for read use-cases.
//!
//! # Invariants
//! - Partner codes are generated here, once per user.
//! - Duplicate goals are skipped by the `(user_id, goal_type)` constraint,
//!   never filtered in application code.

use crate::model::user::{NewUser, UsageMode, User, UserId};
use crate::partner_code::generate_partner_code;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row, TransactionBehavior};

/// Repository interface for user operations.
pub trait UserRepository {
    /// Inserts the user and its goals, returning the storage-generated id.
    fn create_user(&mut self, new_user: &NewUser) -> RepoResult<UserId>;
    /// Gets one user with goals, or `None` when the id is unknown.
    fn get_user(&self, user_id: UserId) -> RepoResult<Option<User>>;
    /// Lists goal types of one user in insertion order.
    fn list_goals(&self, user_id: UserId) -> RepoResult<Vec<String>>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&mut self, new_user: &NewUser) -> RepoResult<UserId> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let user_id: UserId = tx.query_row(
            "INSERT INTO users (birth_year, usage_mode, partner_code)
             VALUES (?1, ?2, ?3)
             RETURNING id;",
            params![
                new_user.birth_year,
                new_user.usage_mode.as_str(),
                generate_partner_code(),
            ],
            |row| row.get(0),
        )?;

        for goal in &new_user.goals {
            tx.execute(
                "INSERT INTO user_goals (user_id, goal_type)
                 VALUES (?1, ?2)
                 ON CONFLICT (user_id, goal_type) DO NOTHING;",
                params![user_id, goal.as_str()],
            )?;
        }

        tx.commit()?;
        Ok(user_id)
    }

    fn get_user(&self, user_id: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                id,
                birth_year,
                usage_mode,
                partner_code,
                created_at
             FROM users
             WHERE id = ?1;",
        )?;

        let mut rows = stmt.query([user_id])?;
        if let Some(row) = rows.next()? {
            let mut user = parse_user_row(row)?;
            user.goals = self.list_goals(user_id)?;
            return Ok(Some(user));
        }

        Ok(None)
    }

    fn list_goals(&self, user_id: UserId) -> RepoResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT goal_type
             FROM user_goals
             WHERE user_id = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([user_id])?;
        let mut goals = Vec::new();
        while let Some(row) = rows.next()? {
            goals.push(row.get("goal_type")?);
        }
        Ok(goals)
    }
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let mode_text: String = row.get("usage_mode")?;
    let usage_mode = UsageMode::parse(&mode_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid usage mode `{mode_text}` in users.usage_mode"
        ))
    })?;

    Ok(User {
        id: row.get("id")?,
        birth_year: row.get("birth_year")?,
        usage_mode,
        partner_code: row.get("partner_code")?,
        created_at: row.get("created_at")?,
        goals: Vec::new(),
    })
}
