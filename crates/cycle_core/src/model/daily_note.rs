//! Daily well-being notes.
//!
//! # Invariants
//! - At most one note exists per `(user_id, note_date)`.
//! - Saving again for the same date replaces the metric fields and keeps `id`.

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};

pub type NoteId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyNote {
    pub id: NoteId,
    pub user_id: UserId,
    /// Calendar date, `YYYY-MM-DD`.
    pub note_date: String,
    pub mood: Option<String>,
    pub energy_level: Option<i64>,
    pub sleep_quality: Option<i64>,
    pub created_at: String,
}

/// Upsert input keyed by `(user_id, note_date)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyNoteInput {
    pub user_id: UserId,
    pub note_date: String,
    pub mood: Option<String>,
    pub energy_level: Option<i64>,
    pub sleep_quality: Option<i64>,
}
