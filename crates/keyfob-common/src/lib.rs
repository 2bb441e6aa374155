//! Keyfob Common — shared plumbing for the keyfob service.
//!
//! Wire error taxonomy, the standard JSON error body, axum response
//! helpers, atomic file persistence, and data-directory paths.

pub mod api;
pub mod error;
pub mod http;
pub mod paths;
pub mod persist;
