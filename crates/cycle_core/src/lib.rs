//! Core domain logic for cycle tracking.
//! Storage, records and repositories shared by every request entry point.

pub mod db;
pub mod logging;
pub mod model;
pub mod partner_code;
pub mod repo;

pub use db::{ConnectionSource, DbError, DbResult, SqliteFileSource};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::article::{Article, ArticleId};
pub use model::cycle::{Cycle, CycleId, NewCycle};
pub use model::daily_note::{DailyNote, DailyNoteInput, NoteId};
pub use model::user::{NewUser, UsageMode, User, UserId};
pub use repo::article_repo::{ArticleRepository, SqliteArticleRepository};
pub use repo::cycle_repo::{CycleRepository, SqliteCycleRepository, RECENT_CYCLES_LIMIT};
pub use repo::daily_note_repo::{DailyNoteRepository, SqliteDailyNoteRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
