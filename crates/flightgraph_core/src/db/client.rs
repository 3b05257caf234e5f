//! Authenticated HTTP session and database handle.
//!
//! # Responsibility
//! - Build the blocking HTTP client from `ConnectionConfig`.
//! - Address `/_db/<name>/_api/...` resources with percent-encoded segments.
//! - Turn the server's JSON envelope into values or `DbError::Server`.
//!
//! # Invariants
//! - A `Database` handle is only handed out after the server confirmed the
//!   database exists.

use super::cursor::{Cursor, CursorBatch};
use super::{DbError, DbResult, ERROR_DATABASE_NOT_FOUND};
use crate::config::{resolve_database_name, ConnectionConfig};
use crate::logging::sanitize_message;
use crate::model::meta::DocumentMeta;
use log::{debug, error, info};
use reqwest::blocking::Client;
use reqwest::{Method, Url};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Instant;

const MAX_LOGGED_ERROR_CHARS: usize = 200;

/// Error envelope returned by the server on failed requests.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(rename = "errorNum")]
    error_num: Option<i64>,
    #[serde(rename = "errorMessage")]
    error_message: Option<String>,
}

/// Session against one server endpoint.
pub struct ArangoClient {
    http: Client,
    config: ConnectionConfig,
    base_url: Url,
}

impl ArangoClient {
    /// Validates `config` and builds an authenticated HTTP session.
    ///
    /// No request is sent yet; reachability is checked by `database()`.
    pub fn connect(config: ConnectionConfig) -> DbResult<Self> {
        config.validate()?;
        let base_url = Url::parse(config.base_url())
            .map_err(|err| DbError::InvalidResponse(format!("unusable endpoint: {err}")))?;
        let http = Client::builder().timeout(config.timeout).build()?;

        info!(
            "event=db_connect module=db status=ok endpoint={} user={}",
            config.base_url(),
            config.username
        );

        Ok(Self {
            http,
            config,
            base_url,
        })
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Selects a database by name; a blank name selects `_system`.
    ///
    /// # Errors
    /// - `DbError::DatabaseNotFound` when the server does not know the name.
    pub fn database(&self, name: &str) -> DbResult<Database<'_>> {
        let name = resolve_database_name(name).to_string();
        let started_at = Instant::now();

        match self.send(Method::GET, &name, &["database", "current"], None) {
            Ok(_) => {
                info!(
                    "event=db_select module=db status=ok database={} duration_ms={}",
                    name,
                    started_at.elapsed().as_millis()
                );
                Ok(Database { client: self, name })
            }
            Err(DbError::Server {
                error_num: Some(ERROR_DATABASE_NOT_FOUND),
                ..
            })
            | Err(DbError::Server { status: 404, .. }) => {
                error!(
                    "event=db_select module=db status=error database={} error_code=database_not_found",
                    name
                );
                Err(DbError::DatabaseNotFound(name))
            }
            Err(err) => Err(err),
        }
    }

    /// Sends one request to `/_db/<database>/_api/<segments...>`.
    pub(crate) fn send(
        &self,
        method: Method,
        database: &str,
        segments: &[&str],
        body: Option<&Value>,
    ) -> DbResult<Value> {
        let url = self.api_url(database, segments)?;
        debug!("event=http_request module=db method={} path={}", method, url.path());

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .basic_auth(&self.config.username, Some(&self.config.password));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send()?;
        let status = response.status().as_u16();
        let text = response.text()?;

        decode_response(status, &text).inspect_err(|err| {
            error!(
                "event=http_request module=db status=error method={} path={} http_status={} error={}",
                method,
                url.path(),
                status,
                sanitize_message(&err.to_string(), MAX_LOGGED_ERROR_CHARS)
            );
        })
    }

    fn api_url(&self, database: &str, segments: &[&str]) -> DbResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| DbError::InvalidResponse("endpoint cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["_db", database, "_api"])
            .extend(segments);
        Ok(url)
    }
}

/// Handle to one selected database.
pub struct Database<'client> {
    client: &'client ArangoClient,
    name: String,
}

impl<'client> Database<'client> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Point read of one document, returned with its `_id`/`_key`/`_rev`.
    pub fn read_document(&self, collection: &str, key: &str) -> DbResult<Value> {
        self.client
            .send(Method::GET, &self.name, &["document", collection, key], None)
    }

    /// Stores `document` in `collection` and returns the assigned metadata.
    pub fn create_document(&self, collection: &str, document: &Value) -> DbResult<DocumentMeta> {
        let created = self.client.send(
            Method::POST,
            &self.name,
            &["document", collection],
            Some(document),
        )?;
        Ok(serde_json::from_value(created)?)
    }

    /// Runs a query with named bind parameters and opens a cursor on it.
    pub fn query(&self, query: &str, bind_vars: &Map<String, Value>) -> DbResult<Cursor<'client>> {
        let mut body = Map::new();
        body.insert("query".to_string(), Value::String(query.to_string()));
        body.insert("bindVars".to_string(), Value::Object(bind_vars.clone()));
        if let Some(batch_size) = self.client.config.batch_size {
            body.insert("batchSize".to_string(), Value::from(batch_size));
        }

        let first = self.client.send(
            Method::POST,
            &self.name,
            &["cursor"],
            Some(&Value::Object(body)),
        )?;
        let batch: CursorBatch = serde_json::from_value(first)?;
        Ok(Cursor::open(self.client, self.name.clone(), batch))
    }
}

/// Maps a status code and body to the decoded JSON value or a server error.
pub(crate) fn decode_response(status: u16, body: &str) -> DbResult<Value> {
    if (200..300).contains(&status) {
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        return Ok(serde_json::from_str(body)?);
    }

    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();
    let (error_num, message) = match envelope {
        Some(envelope) => (
            envelope.error_num,
            envelope
                .error_message
                .unwrap_or_else(|| "no error message".to_string()),
        ),
        None => (None, body.trim().to_string()),
    };

    Err(DbError::Server {
        status,
        error_num,
        message,
    })
}
