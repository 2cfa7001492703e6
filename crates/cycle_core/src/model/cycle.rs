//! Menstrual cycle start records.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

pub type CycleId = i64;

/// One recorded cycle, read-only once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    pub id: CycleId,
    pub user_id: UserId,
    /// Calendar date, `YYYY-MM-DD`.
    pub start_date: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCycle {
    pub user_id: UserId,
    pub start_date: String,
}
