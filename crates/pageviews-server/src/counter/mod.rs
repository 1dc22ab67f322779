//! Counter service: validation plus the read and increment protocols.

pub mod service;

pub use service::{CounterService, UPDATED_AT_FIELD};
