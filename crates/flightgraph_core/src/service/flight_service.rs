//! Airport and flight use-case service.
//!
//! # Responsibility
//! - Issue the fixed lookup, listing, aggregation, traversal and insert
//!   requests against a `DocumentStore`.
//! - Decode rows into model types and time every operation.
//!
//! # Invariants
//! - Query text is declarative and executed by the store; no grouping or
//!   traversal happens here.
//! - Cursors are drained to completion before an operation returns.
//! - Every failure is returned to the caller; nothing is swallowed.

use crate::model::airport::Airport;
use crate::model::flight::Flight;
use crate::model::meta::{DocumentMeta, OutboundFlight, Record, StateCount};
use crate::repo::document_store::{validate_key, BindVars, DocumentStore, RepoError, RepoResult};
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Instant;

pub const AIRPORTS_COLLECTION: &str = "airports";
pub const FLIGHTS_COLLECTION: &str = "flights";

/// Row count used when a caller asks for zero or fewer rows.
pub const DEFAULT_LIMIT: u64 = 20;

const FIRST_AIRPORTS_QUERY: &str = "
FOR a IN airports
LIMIT @n
RETURN a";

const FIRST_FLIGHTS_QUERY: &str = "
FOR f IN flights
LIMIT @n
RETURN f";

const AIRPORTS_PER_STATE_QUERY: &str = "
FOR a IN airports
COLLECT state = a.state
WITH COUNT INTO counter
RETURN {state, counter}";

const OUTBOUND_FLIGHTS_QUERY: &str = "
FOR a, f IN OUTBOUND @airportCode flights
LIMIT @count
RETURN {a, f}";

/// Resolves a requested row count: non-positive values fall back to
/// `DEFAULT_LIMIT`, positive values are used as-is.
pub fn effective_limit(requested: i64) -> u64 {
    match u64::try_from(requested) {
        Ok(n) if n > 0 => n,
        _ => DEFAULT_LIMIT,
    }
}

/// Use-case service over the `airports` / `flights` collections.
pub struct FlightService<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> FlightService<S> {
    /// Creates a service using the provided document store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads one airport by its database key.
    pub fn airport_by_key(&self, key: &str) -> RepoResult<Record<Airport>> {
        self.timed("airport_by_key", || {
            let value = self.store.read_document(AIRPORTS_COLLECTION, key)?;
            decode_record(AIRPORTS_COLLECTION, value)
        })
    }

    /// Reads one flight edge by its database key.
    ///
    /// Fails exactly like `airport_by_key` when the flight cannot be read.
    pub fn flight_by_key(&self, key: &str) -> RepoResult<Record<Flight>> {
        self.timed("flight_by_key", || {
            let value = self.store.read_document(FLIGHTS_COLLECTION, key)?;
            decode_record(FLIGHTS_COLLECTION, value)
        })
    }

    /// Returns the first `requested` airports (20 when `requested <= 0`).
    pub fn first_airports(&self, requested: i64) -> RepoResult<Vec<Record<Airport>>> {
        self.timed("first_airports", || {
            let rows = self.collect_rows(FIRST_AIRPORTS_QUERY, limit_vars(requested))?;
            rows.into_iter()
                .map(|row| decode_record(AIRPORTS_COLLECTION, row))
                .collect()
        })
    }

    /// Returns the first `requested` flights (20 when `requested <= 0`).
    pub fn first_flights(&self, requested: i64) -> RepoResult<Vec<Record<Flight>>> {
        self.timed("first_flights", || {
            let rows = self.collect_rows(FIRST_FLIGHTS_QUERY, limit_vars(requested))?;
            rows.into_iter()
                .map(|row| decode_record(FLIGHTS_COLLECTION, row))
                .collect()
        })
    }

    /// Counts airports per state.
    ///
    /// Airports without a state are counted under the empty string, summed
    /// with any airports whose state is literally empty.
    pub fn airport_count_per_state(&self) -> RepoResult<BTreeMap<String, u64>> {
        self.timed("airport_count_per_state", || {
            let rows = self.collect_rows(AIRPORTS_PER_STATE_QUERY, BindVars::new())?;
            let mut counts: BTreeMap<String, u64> = BTreeMap::new();
            for row in rows {
                let row: StateCount = decode_value("airport_count_per_state", row)?;
                *counts.entry(row.state.unwrap_or_default()).or_default() += row.counter;
            }
            Ok(counts)
        })
    }

    /// Follows up to `requested` outbound flight edges from airport `code`
    /// (20 when `requested <= 0`).
    pub fn flights_from_airport(
        &self,
        code: &str,
        requested: i64,
    ) -> RepoResult<Vec<OutboundFlight>> {
        self.timed("flights_from_airport", || {
            validate_key(code)?;
            let mut bind_vars = BindVars::new();
            bind_vars.insert(
                "airportCode".to_string(),
                Value::String(format!("{AIRPORTS_COLLECTION}/{code}")),
            );
            bind_vars.insert("count".to_string(), Value::from(effective_limit(requested)));

            let rows = self.collect_rows(OUTBOUND_FLIGHTS_QUERY, bind_vars)?;
            rows.into_iter()
                .map(|row| decode_value("flights_from_airport", row))
                .collect()
        })
    }

    /// Stores a new airport and returns the metadata the database assigned.
    pub fn create_airport(&self, airport: &Airport) -> RepoResult<DocumentMeta> {
        self.timed("create_airport", || {
            let document = serde_json::to_value(airport)
                .map_err(|err| RepoError::InvalidData(format!("airport encode failed: {err}")))?;
            self.store.create_document(AIRPORTS_COLLECTION, &document)
        })
    }

    /// Stores a new airport, then reads it back by the assigned key.
    pub fn insert_and_reload(
        &self,
        airport: &Airport,
    ) -> RepoResult<(DocumentMeta, Record<Airport>)> {
        let meta = self.create_airport(airport)?;
        let reloaded = self.airport_by_key(&meta.key)?;
        Ok((meta, reloaded))
    }

    fn collect_rows(&self, query: &str, bind_vars: BindVars) -> RepoResult<Vec<Value>> {
        self.store.query(query, bind_vars)?.collect()
    }

    fn timed<T>(&self, operation: &str, run: impl FnOnce() -> RepoResult<T>) -> RepoResult<T> {
        let started_at = Instant::now();
        info!("event={operation} module=service status=start");

        match run() {
            Ok(value) => {
                info!(
                    "event={operation} module=service status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(value)
            }
            Err(err) => {
                error!(
                    "event={operation} module=service status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

fn limit_vars(requested: i64) -> BindVars {
    let mut bind_vars = BindVars::new();
    bind_vars.insert("n".to_string(), Value::from(effective_limit(requested)));
    bind_vars
}

fn decode_record<T: DeserializeOwned>(source: &str, value: Value) -> RepoResult<Record<T>> {
    let meta = DocumentMeta::deserialize(&value)
        .map_err(|err| RepoError::InvalidData(format!("{source}: missing metadata: {err}")))?;
    let document = decode_value(source, value)?;
    Ok(Record { meta, document })
}

fn decode_value<T: DeserializeOwned>(source: &str, value: Value) -> RepoResult<T> {
    serde_json::from_value(value).map_err(|err| RepoError::InvalidData(format!("{source}: {err}")))
}
