//! Environment-driven handler configuration.
//!
//! # Invariants
//! - `DATABASE_URL` is required; every other setting has a default.
//! - Reading configuration never mutates process state.

use cycle_core::{default_log_level, LogTarget, SqliteFileSource};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub const LOG_LEVEL_ENV: &str = "CYCLE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CYCLE_LOG_DIR";

const URL_PREFIXES: [&str; 3] = ["sqlite://", "sqlite:", "file:"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidDatabaseUrl(String),
    InvalidLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "environment variable `{name}` is not set"),
            Self::InvalidDatabaseUrl(url) => write!(f, "invalid database url `{url}`"),
            Self::InvalidLogDir(message) => f.write_str(message),
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub database_path: PathBuf,
    pub log_level: String,
    pub log_target: LogTarget,
}

impl HandlerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url =
            lookup(DATABASE_URL_ENV).ok_or(ConfigError::MissingVar(DATABASE_URL_ENV))?;
        let database_path = parse_database_url(&database_url)?;

        let log_level = lookup(LOG_LEVEL_ENV)
            .map(|level| level.trim().to_string())
            .filter(|level| !level.is_empty())
            .unwrap_or_else(|| default_log_level().to_string());

        let log_dir = lookup(LOG_DIR_ENV);
        let log_target =
            LogTarget::from_dir_setting(log_dir.as_deref()).map_err(ConfigError::InvalidLogDir)?;

        Ok(Self {
            database_path,
            log_level,
            log_target,
        })
    }

    pub fn connection_source(&self) -> SqliteFileSource {
        SqliteFileSource::new(self.database_path.clone())
    }
}

/// Extracts the SQLite file path from a connection string.
///
/// Accepts a bare path or one prefixed with `sqlite://`, `sqlite:` or `file:`;
/// URI query parameters are ignored.
pub fn parse_database_url(url: &str) -> Result<PathBuf, ConfigError> {
    let trimmed = url.trim();
    let without_scheme = URL_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
        .unwrap_or(trimmed);
    let path = without_scheme
        .split_once('?')
        .map_or(without_scheme, |(path, _)| path);

    if path.is_empty() {
        return Err(ConfigError::InvalidDatabaseUrl(url.to_string()));
    }
    Ok(PathBuf::from(path))
}
