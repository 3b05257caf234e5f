//! Airport vertex document.

use super::null_as_default;
use serde::{Deserialize, Serialize};

/// One document of the `airports` vertex collection.
///
/// Server-side metadata fields (`_key`, `_id`, `_rev`) are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Airport {
    /// Display name of the airport.
    #[serde(deserialize_with = "null_as_default")]
    pub airport: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub long: f64,
}

impl Airport {
    /// Fixed record inserted by the demonstration run.
    pub fn demo() -> Self {
        Self {
            airport: "A new one".to_string(),
            city: "Cincinnati".to_string(),
            state: "NA".to_string(),
            country: "USA".to_string(),
            lat: 39.5155436,
            long: -84.29460752,
        }
    }
}
