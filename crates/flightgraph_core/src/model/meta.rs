//! Database-assigned metadata and result row wrappers.

use serde::{Deserialize, Serialize};

use super::airport::Airport;
use super::flight::Flight;

/// Metadata the database attaches to every stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Document handle, `<collection>/<key>`.
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_key")]
    pub key: String,
    #[serde(rename = "_rev")]
    pub rev: String,
}

/// A decoded document together with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<T> {
    pub meta: DocumentMeta,
    pub document: T,
}

/// One row of a one-hop outbound traversal: the reached airport and the
/// flight edge used to reach it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutboundFlight {
    #[serde(rename = "a")]
    pub airport: Airport,
    #[serde(rename = "f")]
    pub flight: Flight,
}

/// One row of the per-state airport aggregation.
///
/// Airports without a `state` attribute are grouped under `null`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StateCount {
    pub state: Option<String>,
    pub counter: u64,
}
