//! pageviews core: transport-agnostic error types and path validation.
//!
//! This crate defines the error surface and the counter key rules shared by
//! the server and its tests. It carries no transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `PageViewsError`/`Result` so malformed input never crashes the
//! process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod path;

/// Shared result type.
pub use error::{ClientCode, PageViewsError, Result};
pub use path::{CounterPath, PathRule};
