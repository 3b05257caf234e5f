//! HTTP access to the document-graph database server.
//!
//! # Responsibility
//! - Open authenticated sessions and select a database.
//! - Issue document and cursor requests and decode server envelopes.
//!
//! # Invariants
//! - Every non-2xx response surfaces as `DbError::Server`, never as data.
//! - Cursors with remaining server-side state are released when dropped.

use crate::config::ConfigError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod client;
mod cursor;

pub use client::{ArangoClient, Database};
pub use cursor::Cursor;

pub type DbResult<T> = Result<T, DbError>;

/// Server error number for "document not found".
pub const ERROR_DOCUMENT_NOT_FOUND: i64 = 1202;
/// Server error number for "database not found".
pub const ERROR_DATABASE_NOT_FOUND: i64 = 1228;

#[derive(Debug)]
pub enum DbError {
    Config(ConfigError),
    Transport(reqwest::Error),
    Server {
        status: u16,
        error_num: Option<i64>,
        message: String,
    },
    Decode(serde_json::Error),
    InvalidResponse(String),
    DatabaseNotFound(String),
}

impl DbError {
    /// Whether the server reported that the addressed document does not exist.
    pub fn is_document_not_found(&self) -> bool {
        matches!(
            self,
            Self::Server {
                status: 404,
                error_num: Some(ERROR_DOCUMENT_NOT_FOUND),
                ..
            }
        )
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Transport(err) => write!(f, "request failed: {err}"),
            Self::Server {
                status,
                error_num,
                message,
            } => match error_num {
                Some(num) => write!(f, "server error {status} ({num}): {message}"),
                None => write!(f, "server error {status}: {message}"),
            },
            Self::Decode(err) => write!(f, "failed to decode server response: {err}"),
            Self::InvalidResponse(message) => write!(f, "invalid server response: {message}"),
            Self::DatabaseNotFound(name) => write!(f, "database not found: {name}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Server { .. } | Self::InvalidResponse(_) | Self::DatabaseNotFound(_) => None,
        }
    }
}

impl From<ConfigError> for DbError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<reqwest::Error> for DbError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for DbError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}
