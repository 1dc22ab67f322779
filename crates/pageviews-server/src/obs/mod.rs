//! In-process request metrics.
//!
//! Atomics in `DashMap`s keyed by label set, rendered by the `/metrics`
//! handler in Prometheus text format.

pub mod metrics;

pub use metrics::ServiceMetrics;
