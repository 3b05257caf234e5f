//! Document access contracts and the database-backed implementation.
//!
//! # Responsibility
//! - Define the narrow read/create/query seam the service depends on.
//! - Isolate HTTP and server error details from use-case orchestration.
//!
//! # Invariants
//! - Document keys are validated before any request is sent.
//! - A missing document is reported as `RepoError::NotFound`, never as a
//!   default-valued record.

pub mod document_store;
