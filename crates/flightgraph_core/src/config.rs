//! Connection configuration for the flight graph database.
//!
//! # Responsibility
//! - Hold endpoint, credentials and database selection in one value.
//! - Reject unusable settings before any request is sent.
//!
//! # Invariants
//! - An empty database name always resolves to `_system`.
//! - `validate()` succeeds for `ConnectionConfig::default()`.
//! - Endpoints are plain `http://` URLs.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8529";
pub const DEFAULT_USERNAME: &str = "root";
pub const SYSTEM_DATABASE: &str = "_system";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

static DATABASE_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_\-]{0,63}$").expect("database name pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidEndpoint(String),
    EmptyUsername,
    InvalidDatabaseName(String),
    InvalidBatchSize(u32),
    ZeroTimeout,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEndpoint(endpoint) => write!(
                f,
                "invalid endpoint `{endpoint}`; expected http://host[:port]"
            ),
            Self::EmptyUsername => write!(f, "username cannot be empty"),
            Self::InvalidDatabaseName(name) => write!(f, "invalid database name `{name}`"),
            Self::InvalidBatchSize(size) => {
                write!(f, "batch size must be positive, got {size}")
            }
            Self::ZeroTimeout => write!(f, "request timeout must be greater than zero"),
        }
    }
}

impl Error for ConfigError {}

/// Settings needed to open a session against the database server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Base URL of the server, without a trailing path.
    pub endpoint: String,
    pub username: String,
    pub password: String,
    /// Database to select; blank means `_system`.
    pub database: String,
    pub timeout: Duration,
    /// Cursor batch size; `None` keeps the server default.
    pub batch_size: Option<u32>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: String::new(),
            database: SYSTEM_DATABASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            batch_size: None,
        }
    }
}

impl ConnectionConfig {
    /// Checks every field and returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_endpoint(&self.endpoint)?;
        if self.username.trim().is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        validate_database_name(resolve_database_name(&self.database))?;
        if self.batch_size == Some(0) {
            return Err(ConfigError::InvalidBatchSize(0));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Endpoint with any trailing `/` removed, ready for path joining.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim().trim_end_matches('/')
    }
}

/// Resolves the database to select; blank names fall back to `_system`.
pub fn resolve_database_name(name: &str) -> &str {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        SYSTEM_DATABASE
    } else {
        trimmed
    }
}

fn validate_endpoint(endpoint: &str) -> Result<(), ConfigError> {
    let trimmed = endpoint.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .ok_or_else(|| ConfigError::InvalidEndpoint(endpoint.to_string()))?;

    let host_name = host.split(':').next().unwrap_or_default();
    if host_name.is_empty() || host.contains('/') {
        return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
    }
    Ok(())
}

fn validate_database_name(name: &str) -> Result<(), ConfigError> {
    if name == SYSTEM_DATABASE || DATABASE_NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ConfigError::InvalidDatabaseName(name.to_string()))
    }
}
