//! Daily note repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Upsert one note per `(user_id, note_date)`.
//!
//! # Invariants
//! - A repeated save updates `mood`, `energy_level`, `sleep_quality` in place
//!   and returns the original note id.

use crate::model::daily_note::{DailyNoteInput, NoteId};
use crate::repo::RepoResult;
use rusqlite::{params, Connection, TransactionBehavior};

pub trait DailyNoteRepository {
    /// Inserts or updates the note for the input's user and date.
    fn save_daily_note(&mut self, note: &DailyNoteInput) -> RepoResult<NoteId>;
}

pub struct SqliteDailyNoteRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteDailyNoteRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl DailyNoteRepository for SqliteDailyNoteRepository<'_> {
    fn save_daily_note(&mut self, note: &DailyNoteInput) -> RepoResult<NoteId> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let note_id: NoteId = tx.query_row(
            "INSERT INTO daily_notes (user_id, note_date, mood, energy_level, sleep_quality)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (user_id, note_date) DO UPDATE SET
                mood = excluded.mood,
                energy_level = excluded.energy_level,
                sleep_quality = excluded.sleep_quality
             RETURNING id;",
            params![
                note.user_id,
                note.note_date.as_str(),
                note.mood.as_deref(),
                note.energy_level,
                note.sleep_quality,
            ],
            |row| row.get(0),
        )?;
        tx.commit()?;
        Ok(note_id)
    }
}
