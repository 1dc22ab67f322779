//! pageviews server library entry.
//!
//! Wires the counter service, key-value store backends, HTTP surface, and ops
//! endpoints into one axum application. Consumed by the binary (`main.rs`)
//! and by integration tests.

pub mod app_state;
pub mod config;
pub mod counter;
pub mod http;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
