//! User and goal model.
//!
//! # Invariants
//! - `partner_code` is generated once at creation and never reissued.
//! - `goals` holds each goal type at most once per user.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-generated user identifier.
pub type UserId = i64;

/// How the app is being used by the account owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsageMode {
    /// Tracking one's own cycle.
    #[serde(rename = "self")]
    SelfTracking,
    /// Following a partner's cycle.
    #[serde(rename = "partner")]
    Partner,
}

impl UsageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelfTracking => "self",
            Self::Partner => "partner",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "self" => Some(Self::SelfTracking),
            "partner" => Some(Self::Partner),
            _ => None,
        }
    }
}

impl Display for UsageMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted user with its goal set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub birth_year: i64,
    pub usage_mode: UsageMode,
    /// URL-safe token used by partner linking.
    pub partner_code: String,
    pub created_at: String,
    /// Goal types in insertion order.
    pub goals: Vec<String>,
}

/// Input for user creation. Duplicate goals are collapsed by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub birth_year: i64,
    pub usage_mode: UsageMode,
    pub goals: Vec<String>,
}
