//! Use-case services.
//!
//! # Responsibility
//! - Turn fixed demonstration queries into typed, use-case level APIs.
//! - Keep the CLI decoupled from HTTP and JSON details.

pub mod flight_service;
