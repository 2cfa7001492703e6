//! Typed per-action inputs decoded from a gateway request.
//!
//! # Invariants
//! - Required-field absence is reported as [`ActionError::MissingField`]
//!   before any storage access.
//! - Integer body fields accept a JSON number or a decimal string; any other
//!   string is [`ActionError::InvalidField`].
//! - Value checks beyond presence (dates, referential integrity) are left to
//!   the store.

use crate::error::{ActionError, ActionResult};
use crate::request::GatewayRequest;
use crate::router::Route;
use cycle_core::{DailyNoteInput, NewCycle, NewUser, UsageMode, UserId};
use serde::Deserialize;

/// Validated input for one routed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionInput {
    CreateUser(NewUser),
    GetUser(UserId),
    AddCycle(NewCycle),
    GetCycles(UserId),
    SaveDailyNote(DailyNoteInput),
    GetArticles,
}

/// Integer body field as sent by clients that stringify numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IntField {
    Number(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct CreateUserBody {
    birth_year: Option<IntField>,
    usage_mode: Option<UsageMode>,
    goals: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct AddCycleBody {
    user_id: Option<IntField>,
    start_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SaveDailyNoteBody {
    user_id: Option<IntField>,
    note_date: Option<String>,
    mood: Option<String>,
    energy_level: Option<IntField>,
    sleep_quality: Option<IntField>,
}

impl ActionInput {
    pub fn from_request(route: Route, request: &GatewayRequest) -> ActionResult<Self> {
        match route {
            Route::CreateUser => {
                let body: CreateUserBody = request.json_body()?;
                Ok(Self::CreateUser(NewUser {
                    birth_year: require(int_field(body.birth_year, "birth_year")?, "birth_year")?,
                    usage_mode: require(body.usage_mode, "usage_mode")?,
                    goals: body.goals.unwrap_or_default(),
                }))
            }
            Route::GetUser => Ok(Self::GetUser(query_user_id(request)?)),
            Route::AddCycle => {
                let body: AddCycleBody = request.json_body()?;
                Ok(Self::AddCycle(NewCycle {
                    user_id: require(int_field(body.user_id, "user_id")?, "user_id")?,
                    start_date: require(body.start_date, "start_date")?,
                }))
            }
            Route::GetCycles => Ok(Self::GetCycles(query_user_id(request)?)),
            Route::SaveDailyNote => {
                let body: SaveDailyNoteBody = request.json_body()?;
                Ok(Self::SaveDailyNote(DailyNoteInput {
                    user_id: require(int_field(body.user_id, "user_id")?, "user_id")?,
                    note_date: require(body.note_date, "note_date")?,
                    mood: body.mood,
                    energy_level: int_field(body.energy_level, "energy_level")?,
                    sleep_quality: int_field(body.sleep_quality, "sleep_quality")?,
                }))
            }
            Route::GetArticles => Ok(Self::GetArticles),
        }
    }
}

fn require<T>(value: Option<T>, field: &'static str) -> ActionResult<T> {
    value.ok_or(ActionError::MissingField(field))
}

fn int_field(value: Option<IntField>, field: &'static str) -> ActionResult<Option<i64>> {
    match value {
        None => Ok(None),
        Some(IntField::Number(number)) => Ok(Some(number)),
        Some(IntField::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ActionError::InvalidField(field)),
    }
}

fn query_user_id(request: &GatewayRequest) -> ActionResult<UserId> {
    let raw = request
        .query("user_id")
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ActionError::MissingField("user_id"))?;
    raw.parse()
        .map_err(|_| ActionError::InvalidField("user_id"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Method;

    #[test]
    fn create_user_defaults_goals_to_empty() {
        let request = GatewayRequest::new(Method::Post)
            .with_body(r#"{"birth_year": 1994, "usage_mode": "self"}"#);
        let input = ActionInput::from_request(Route::CreateUser, &request).unwrap();
        assert_eq!(
            input,
            ActionInput::CreateUser(NewUser {
                birth_year: 1994,
                usage_mode: UsageMode::SelfTracking,
                goals: Vec::new(),
            })
        );
    }

    #[test]
    fn missing_required_body_field_is_reported_by_name() {
        let request =
            GatewayRequest::new(Method::Post).with_body(r#"{"usage_mode": "partner"}"#);
        let err = ActionInput::from_request(Route::CreateUser, &request).unwrap_err();
        assert!(matches!(err, ActionError::MissingField("birth_year")));
    }

    #[test]
    fn empty_body_reports_first_missing_field() {
        let request = GatewayRequest::new(Method::Post);
        let err = ActionInput::from_request(Route::AddCycle, &request).unwrap_err();
        assert!(matches!(err, ActionError::MissingField("user_id")));
    }

    #[test]
    fn unknown_usage_mode_fails_body_decoding() {
        let request = GatewayRequest::new(Method::Post)
            .with_body(r#"{"birth_year": 1994, "usage_mode": "robot"}"#);
        let err = ActionInput::from_request(Route::CreateUser, &request).unwrap_err();
        assert!(matches!(err, ActionError::Body(_)));
    }

    #[test]
    fn query_user_id_must_be_present_and_numeric() {
        let missing = GatewayRequest::new(Method::Get).with_action("get_user");
        assert!(matches!(
            ActionInput::from_request(Route::GetUser, &missing).unwrap_err(),
            ActionError::MissingField("user_id")
        ));

        let garbage = missing.clone().with_query("user_id", "abc");
        assert!(matches!(
            ActionInput::from_request(Route::GetCycles, &garbage).unwrap_err(),
            ActionError::InvalidField("user_id")
        ));

        let valid = missing.with_query("user_id", " 42 ");
        assert_eq!(
            ActionInput::from_request(Route::GetUser, &valid).unwrap(),
            ActionInput::GetUser(42)
        );
    }

    #[test]
    fn daily_note_metrics_are_optional() {
        let request = GatewayRequest::new(Method::Post)
            .with_body(r#"{"user_id": 1, "note_date": "2026-01-15", "mood": "calm"}"#);
        let input = ActionInput::from_request(Route::SaveDailyNote, &request).unwrap();
        assert_eq!(
            input,
            ActionInput::SaveDailyNote(DailyNoteInput {
                user_id: 1,
                note_date: "2026-01-15".to_string(),
                mood: Some("calm".to_string()),
                energy_level: None,
                sleep_quality: None,
            })
        );
    }

    #[test]
    fn stringified_integers_are_accepted_in_bodies() {
        let request = GatewayRequest::new(Method::Post)
            .with_body(r#"{"birth_year": "1990", "usage_mode": "self"}"#);
        let input = ActionInput::from_request(Route::CreateUser, &request).unwrap();
        assert!(matches!(
            input,
            ActionInput::CreateUser(NewUser { birth_year: 1990, .. })
        ));

        let request = GatewayRequest::new(Method::Post).with_body(
            r#"{"user_id": "5", "note_date": "2026-01-15", "energy_level": "3", "sleep_quality": 4}"#,
        );
        let input = ActionInput::from_request(Route::SaveDailyNote, &request).unwrap();
        assert_eq!(
            input,
            ActionInput::SaveDailyNote(DailyNoteInput {
                user_id: 5,
                note_date: "2026-01-15".to_string(),
                mood: None,
                energy_level: Some(3),
                sleep_quality: Some(4),
            })
        );
    }

    #[test]
    fn non_numeric_integer_text_is_an_invalid_field() {
        let request = GatewayRequest::new(Method::Post)
            .with_body(r#"{"user_id": "abc", "start_date": "2026-01-01"}"#);
        let err = ActionInput::from_request(Route::AddCycle, &request).unwrap_err();
        assert!(matches!(err, ActionError::InvalidField("user_id")));

        let request = GatewayRequest::new(Method::Post)
            .with_body(r#"{"user_id": 1, "note_date": "2026-01-15", "energy_level": "high"}"#);
        let err = ActionInput::from_request(Route::SaveDailyNote, &request).unwrap_err();
        assert!(matches!(err, ActionError::InvalidField("energy_level")));
    }
}
