//! Core logic for the flightgraph demonstration client.
//! Connects to a document-graph database and runs fixed airport/flight queries.

pub mod config;
pub mod db;
pub mod display;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{resolve_database_name, ConfigError, ConnectionConfig};
pub use db::{ArangoClient, Cursor, Database, DbError, DbResult};
pub use display::{print_contents, Printable};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::airport::Airport;
pub use model::flight::Flight;
pub use model::meta::{DocumentMeta, OutboundFlight, Record, StateCount};
pub use repo::document_store::{
    validate_key, ArangoDocumentStore, BindVars, DocumentStore, DocumentStream, RepoError,
    RepoResult,
};
pub use service::flight_service::{effective_limit, FlightService, DEFAULT_LIMIT};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
