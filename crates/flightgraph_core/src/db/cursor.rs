//! Server-side query cursor drained batch by batch.

use super::client::ArangoClient;
use super::{DbError, DbResult};
use log::{debug, warn};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use std::collections::VecDeque;

/// One batch of a cursor response.
#[derive(Debug, Deserialize)]
pub(crate) struct CursorBatch {
    #[serde(default)]
    pub(crate) result: Vec<Value>,
    #[serde(rename = "hasMore", default)]
    pub(crate) has_more: bool,
    #[serde(default)]
    pub(crate) id: Option<String>,
}

/// Iterator over query results.
///
/// Yields buffered rows, then fetches the next batch while the server reports
/// more. A cursor dropped before exhaustion is deleted on the server.
pub struct Cursor<'client> {
    client: &'client ArangoClient,
    database: String,
    id: Option<String>,
    buffer: VecDeque<Value>,
    has_more: bool,
    failed: bool,
}

impl<'client> Cursor<'client> {
    pub(crate) fn open(client: &'client ArangoClient, database: String, batch: CursorBatch) -> Self {
        Self {
            client,
            database,
            id: batch.id,
            buffer: batch.result.into(),
            has_more: batch.has_more,
            failed: false,
        }
    }

    /// Whether the server still holds rows not yet fetched.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    fn fetch_next_batch(&mut self) -> DbResult<()> {
        let id = self.id.clone().ok_or_else(|| {
            DbError::InvalidResponse("cursor reports more results but has no id".to_string())
        })?;

        let body = self
            .client
            .send(Method::PUT, &self.database, &["cursor", id.as_str()], None)?;
        let batch: CursorBatch = serde_json::from_value(body)?;
        debug!(
            "event=cursor_fetch module=db status=ok rows={} has_more={}",
            batch.result.len(),
            batch.has_more
        );

        self.buffer.extend(batch.result);
        self.has_more = batch.has_more;
        if batch.id.is_some() {
            self.id = batch.id;
        }
        Ok(())
    }
}

impl Iterator for Cursor<'_> {
    type Item = DbResult<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.buffer.pop_front() {
                return Some(Ok(row));
            }
            if !self.has_more || self.failed {
                return None;
            }
            if let Err(err) = self.fetch_next_batch() {
                self.failed = true;
                return Some(Err(err));
            }
        }
    }
}

impl Drop for Cursor<'_> {
    fn drop(&mut self) {
        if !self.has_more {
            return;
        }
        let Some(id) = self.id.as_deref() else {
            return;
        };
        if let Err(err) = self
            .client
            .send(Method::DELETE, &self.database, &["cursor", id], None)
        {
            warn!(
                "event=cursor_close module=db status=error cursor_id={} error={}",
                id, err
            );
        }
    }
}
