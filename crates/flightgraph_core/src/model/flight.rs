//! Flight edge document.
//!
//! # Invariants
//! - `from` / `to` are `airports/<code>` document handles when the flight was
//!   read from the edge collection, and `None` otherwise.
//! - Missing or `null` timestamps decode to the Unix epoch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// One document of the `flights` edge collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flight {
    #[serde(rename = "Year", deserialize_with = "null_as_default")]
    pub year: i32,
    #[serde(rename = "Month", deserialize_with = "null_as_default")]
    pub month: i32,
    #[serde(rename = "DayofMonth", deserialize_with = "null_as_default")]
    pub day_of_month: i32,
    #[serde(rename = "DayOfWeek", deserialize_with = "null_as_default")]
    pub day_of_week: i32,
    /// Local departure time as `hhmm`.
    #[serde(rename = "DepTime", deserialize_with = "null_as_default")]
    pub dep_time: i32,
    /// Local arrival time as `hhmm`.
    #[serde(rename = "ArrTime", deserialize_with = "null_as_default")]
    pub arr_time: i32,
    #[serde(rename = "DepTimeUTC", deserialize_with = "null_as_default")]
    pub dep_time_utc: DateTime<Utc>,
    #[serde(rename = "ArrTimeUTC", deserialize_with = "null_as_default")]
    pub arr_time_utc: DateTime<Utc>,
    #[serde(rename = "UniqueCarrier", deserialize_with = "null_as_default")]
    pub unique_carrier: String,
    #[serde(rename = "FlightNum", deserialize_with = "null_as_default")]
    pub flight_num: i32,
    #[serde(rename = "TailNum", deserialize_with = "null_as_default")]
    pub tail_num: String,
    /// Miles.
    #[serde(rename = "Distance", deserialize_with = "null_as_default")]
    pub distance: i64,
    #[serde(rename = "_from", skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(rename = "_to", skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}
