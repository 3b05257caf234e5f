//! Document shapes read from and written to the flight graph.
//!
//! # Responsibility
//! - Mirror the external `airports` / `flights` document schemas exactly.
//! - Pair decoded documents with database-assigned metadata.
//!
//! # Invariants
//! - JSON field names match the stored documents byte-for-byte.
//! - Identity (`_key`) is assigned by the database and lives in
//!   `DocumentMeta`, never inside the document structs.
//! - Missing or `null` scalar fields decode to their zero value; only a
//!   value of the wrong type is a decode error.

pub mod airport;
pub mod flight;
pub mod meta;

use serde::{Deserialize, Deserializer};

/// Decodes JSON `null` as the type's default, like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
