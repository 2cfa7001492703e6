//! Action handlers: one storage use-case per routed action.
//!
//! # Responsibility
//! - Translate a validated [`ActionInput`] into repository calls.
//! - Build the JSON success payload for the envelope.
//!
//! # Invariants
//! - Each write action commits exactly once through its repository.
//! - `get_user` is the only handler that checks existence before answering.

use crate::error::{ActionError, ActionResult};
use crate::input::ActionInput;
use cycle_core::{
    ArticleRepository, CycleRepository, DailyNoteRepository, SqliteArticleRepository,
    SqliteCycleRepository, SqliteDailyNoteRepository, SqliteUserRepository, UserRepository,
};
use log::debug;
use rusqlite::Connection;
use serde_json::{json, Value};

/// Runs one action on the request's connection.
pub fn execute(input: ActionInput, conn: &mut Connection) -> ActionResult<Value> {
    match input {
        ActionInput::CreateUser(new_user) => {
            let user_id = SqliteUserRepository::new(conn).create_user(&new_user)?;
            debug!(
                "event=user_create module=actions status=ok user_id={user_id} goals={}",
                new_user.goals.len()
            );
            Ok(json!({ "user_id": user_id }))
        }
        ActionInput::GetUser(user_id) => {
            let user = SqliteUserRepository::new(conn)
                .get_user(user_id)?
                .ok_or(ActionError::UserNotFound)?;
            Ok(serde_json::to_value(user)?)
        }
        ActionInput::AddCycle(cycle) => {
            let cycle_id = SqliteCycleRepository::new(conn).add_cycle(&cycle)?;
            debug!(
                "event=cycle_add module=actions status=ok user_id={} cycle_id={cycle_id}",
                cycle.user_id
            );
            Ok(json!({ "cycle_id": cycle_id }))
        }
        ActionInput::GetCycles(user_id) => {
            let cycles = SqliteCycleRepository::new(conn).list_recent_cycles(user_id)?;
            Ok(serde_json::to_value(cycles)?)
        }
        ActionInput::SaveDailyNote(note) => {
            let note_id = SqliteDailyNoteRepository::new(conn).save_daily_note(&note)?;
            debug!(
                "event=daily_note_save module=actions status=ok user_id={} note_id={note_id}",
                note.user_id
            );
            Ok(json!({ "note_id": note_id }))
        }
        ActionInput::GetArticles => {
            let articles = SqliteArticleRepository::new(conn).list_articles()?;
            Ok(serde_json::to_value(articles)?)
        }
    }
}
