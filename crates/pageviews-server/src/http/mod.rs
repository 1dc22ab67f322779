//! HTTP surface: counter handlers, error mapping, CORS.

pub mod cors;
pub mod counters;
pub mod error;

pub use error::{ApiError, Surface};
