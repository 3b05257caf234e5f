//! In-memory `DocumentStore` used by integration tests.
//!
//! Listing queries (`FOR x IN <collection> LIMIT @n`) are answered from the
//! stored documents; every other query returns the rows scripted for it.

#![allow(dead_code)]

use flightgraph_core::{
    BindVars, DbError, DocumentMeta, DocumentStore, DocumentStream, RepoError, RepoResult,
};
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

#[derive(Default)]
pub struct MemoryStore {
    collections: RefCell<HashMap<String, BTreeMap<String, Value>>>,
    scripted: RefCell<Vec<(String, Vec<Value>)>>,
    queries: RefCell<Vec<(String, BindVars)>>,
    failing_collections: RefCell<Vec<String>>,
    next_key: Cell<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_key: Cell::new(1000),
            ..Self::default()
        }
    }

    /// Stores `document` under `collection/key` with server-style metadata.
    pub fn insert(&self, collection: &str, key: &str, document: Value) {
        let mut stored = document;
        if let Value::Object(fields) = &mut stored {
            fields.insert("_key".to_string(), json!(key));
            fields.insert("_id".to_string(), json!(format!("{collection}/{key}")));
            fields.insert("_rev".to_string(), json!(format!("_rev_{key}")));
        }
        self.collections
            .borrow_mut()
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), stored);
    }

    /// Answers any query containing `fragment` with `rows`.
    pub fn script(&self, fragment: &str, rows: Vec<Value>) {
        self.scripted.borrow_mut().push((fragment.to_string(), rows));
    }

    /// Makes every read of `collection` fail with a server error.
    pub fn fail_reads_of(&self, collection: &str) {
        self.failing_collections
            .borrow_mut()
            .push(collection.to_string());
    }

    pub fn executed_queries(&self) -> Vec<(String, BindVars)> {
        self.queries.borrow().clone()
    }

    pub fn document_count(&self, collection: &str) -> usize {
        self.collections
            .borrow()
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    fn listing_rows(&self, query: &str, bind_vars: &BindVars) -> Option<Vec<Value>> {
        let collection = ["airports", "flights"]
            .into_iter()
            .find(|name| query.contains(&format!("IN {name}\nLIMIT @n")))?;
        let limit = bind_vars.get("n")?.as_u64()? as usize;
        let rows = self
            .collections
            .borrow()
            .get(collection)
            .map(|docs| docs.values().take(limit).cloned().collect())
            .unwrap_or_default();
        Some(rows)
    }
}

impl DocumentStore for MemoryStore {
    fn read_document(&self, collection: &str, key: &str) -> RepoResult<Value> {
        if self
            .failing_collections
            .borrow()
            .iter()
            .any(|name| name == collection)
        {
            return Err(RepoError::Db(DbError::Server {
                status: 503,
                error_num: Some(503),
                message: "service unavailable".to_string(),
            }));
        }

        self.collections
            .borrow()
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned()
            .ok_or_else(|| RepoError::NotFound {
                collection: collection.to_string(),
                key: key.to_string(),
            })
    }

    fn create_document(&self, collection: &str, document: &Value) -> RepoResult<DocumentMeta> {
        let key = self.next_key.get().to_string();
        self.next_key.set(self.next_key.get() + 1);
        self.insert(collection, &key, document.clone());

        Ok(DocumentMeta {
            id: format!("{collection}/{key}"),
            key: key.clone(),
            rev: format!("_rev_{key}"),
        })
    }

    fn query(&self, query: &str, bind_vars: BindVars) -> RepoResult<DocumentStream<'_>> {
        self.queries
            .borrow_mut()
            .push((query.to_string(), bind_vars.clone()));

        let rows = match self.listing_rows(query, &bind_vars) {
            Some(rows) => rows,
            None => self
                .scripted
                .borrow()
                .iter()
                .find(|(fragment, _)| query.contains(fragment.as_str()))
                .map(|(_, rows)| rows.clone())
                .unwrap_or_default(),
        };

        Ok(Box::new(rows.into_iter().map(Ok)))
    }
}

pub fn airport_json(name: &str, city: &str, state: &str) -> Value {
    json!({
        "airport": name,
        "city": city,
        "state": state,
        "country": "USA",
        "lat": 34.0,
        "long": -118.0
    })
}

pub fn flight_json(flight_num: i32, from: &str, to: &str) -> Value {
    json!({
        "Year": 2008,
        "Month": 1,
        "DayofMonth": 3,
        "DayOfWeek": 4,
        "DepTime": 1343,
        "ArrTime": 1451,
        "DepTimeUTC": "2008-01-03T21:43:00.000Z",
        "ArrTimeUTC": "2008-01-03T22:51:00.000Z",
        "UniqueCarrier": "WN",
        "FlightNum": flight_num,
        "TailNum": "N386SW",
        "Distance": 236,
        "_from": format!("airports/{from}"),
        "_to": format!("airports/{to}")
    })
}
