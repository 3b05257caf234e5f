//! Document store contract and server-backed implementation.
//!
//! # Responsibility
//! - Provide point reads, document creation and cursor queries over raw JSON.
//! - Map server "document not found" responses to a semantic error.
//!
//! # Invariants
//! - Keys failing `validate_key` never reach the server.
//! - Query rows are streamed; callers decide whether to drain or stop early.

use crate::db::{Database, DbError};
use crate::model::meta::DocumentMeta;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

static DOCUMENT_KEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_\-:.@()+,=;$!*'%]{1,254}$").expect("document key pattern is valid")
});

pub type RepoResult<T> = Result<T, RepoError>;

/// Named query parameters, bound server-side as `@name`.
pub type BindVars = Map<String, Value>;

/// Rows produced by a query, in server order.
pub type DocumentStream<'a> = Box<dyn Iterator<Item = RepoResult<Value>> + 'a>;

/// Error for document reads, writes and queries.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound { collection: String, key: String },
    InvalidKey(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { collection, key } => {
                write!(f, "document not found: {collection}/{key}")
            }
            Self::InvalidKey(key) => write!(f, "invalid document key `{key}`"),
            Self::InvalidData(message) => write!(f, "invalid document data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidKey(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// Raw document access used by the flight service.
pub trait DocumentStore {
    /// Reads one document, including its `_id`/`_key`/`_rev` fields.
    fn read_document(&self, collection: &str, key: &str) -> RepoResult<Value>;
    /// Creates one document and returns the metadata the store assigned.
    fn create_document(&self, collection: &str, document: &Value) -> RepoResult<DocumentMeta>;
    /// Runs a declarative query with named parameters.
    fn query(&self, query: &str, bind_vars: BindVars) -> RepoResult<DocumentStream<'_>>;
}

/// Document store backed by a selected server database.
pub struct ArangoDocumentStore<'client> {
    database: Database<'client>,
}

impl<'client> ArangoDocumentStore<'client> {
    pub fn new(database: Database<'client>) -> Self {
        Self { database }
    }

    pub fn database(&self) -> &Database<'client> {
        &self.database
    }
}

impl DocumentStore for ArangoDocumentStore<'_> {
    fn read_document(&self, collection: &str, key: &str) -> RepoResult<Value> {
        validate_key(key)?;
        self.database
            .read_document(collection, key)
            .map_err(|err| {
                if err.is_document_not_found() {
                    RepoError::NotFound {
                        collection: collection.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    RepoError::Db(err)
                }
            })
    }

    fn create_document(&self, collection: &str, document: &Value) -> RepoResult<DocumentMeta> {
        Ok(self.database.create_document(collection, document)?)
    }

    fn query(&self, query: &str, bind_vars: BindVars) -> RepoResult<DocumentStream<'_>> {
        let cursor = self.database.query(query, &bind_vars)?;
        Ok(Box::new(cursor.map(|row| row.map_err(RepoError::from))))
    }
}

/// Checks a document key against the server's allowed key alphabet.
pub fn validate_key(key: &str) -> RepoResult<()> {
    if DOCUMENT_KEY_PATTERN.is_match(key) {
        Ok(())
    } else {
        Err(RepoError::InvalidKey(key.to_string()))
    }
}
