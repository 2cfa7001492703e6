//! Action error model and its mapping onto response status codes.
//!
//! # Invariants
//! - Routing and not-found messages are fixed strings callers match on.
//! - Status mapping lives only in [`ActionError::status_code`].

use cycle_core::{DbError, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ActionResult<T> = Result<T, ActionError>;

pub const INVALID_ACTION_MESSAGE: &str = "Invalid action";
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

#[derive(Debug)]
pub enum ActionError {
    /// (method, action) pair is not in the route table.
    InvalidAction,
    /// `get_user` lookup found no row.
    UserNotFound,
    /// A required input is absent.
    MissingField(&'static str),
    /// An input is present but not usable, e.g. a non-numeric `user_id`.
    InvalidField(&'static str),
    /// Request body could not be decoded.
    Body(String),
    /// Success payload could not be encoded.
    Serialization(serde_json::Error),
    Db(DbError),
    Repo(RepoError),
}

impl ActionError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidAction | Self::MissingField(_) | Self::InvalidField(_) => 400,
            Self::UserNotFound => 404,
            Self::Body(_) | Self::Serialization(_) | Self::Db(_) | Self::Repo(_) => 500,
        }
    }

    /// Short machine-friendly code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAction => "invalid_action",
            Self::UserNotFound => "user_not_found",
            Self::MissingField(_) => "missing_field",
            Self::InvalidField(_) => "invalid_field",
            Self::Body(_) => "body_decode_failed",
            Self::Serialization(_) => "serialization_failed",
            Self::Db(_) => "db_failed",
            Self::Repo(_) => "repo_failed",
        }
    }
}

impl Display for ActionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAction => f.write_str(INVALID_ACTION_MESSAGE),
            Self::UserNotFound => f.write_str(USER_NOT_FOUND_MESSAGE),
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::InvalidField(field) => write!(f, "invalid value for field `{field}`"),
            Self::Body(message) => f.write_str(message),
            Self::Serialization(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ActionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialization(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for ActionError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for ActionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<serde_json::Error> for ActionError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

#[cfg(test)]
mod tests {
    use super::ActionError;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(ActionError::InvalidAction.status_code(), 400);
        assert_eq!(ActionError::MissingField("user_id").status_code(), 400);
        assert_eq!(ActionError::UserNotFound.status_code(), 404);
        assert_eq!(ActionError::Body("eof".to_string()).status_code(), 500);
    }

    #[test]
    fn fixed_messages_are_stable() {
        assert_eq!(ActionError::InvalidAction.to_string(), "Invalid action");
        assert_eq!(ActionError::UserNotFound.to_string(), "User not found");
        assert_eq!(
            ActionError::MissingField("note_date").to_string(),
            "missing required field `note_date`"
        );
    }
}
