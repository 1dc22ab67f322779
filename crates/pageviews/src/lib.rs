//! Top-level facade crate for pageviews.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use pageviews_core::*;
}

pub mod server {
    pub use pageviews_server::*;
}
