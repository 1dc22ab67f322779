//! Key-value store seam.
//!
//! The counter service talks to storage only through `KvStore`. Two backends
//! ship with the server: Redis for production and an in-memory fake with the
//! same contract for local runs and tests.

pub mod memory;
pub mod redis_store;

use async_trait::async_trait;
use thiserror::Error;

use pageviews_core::PageViewsError;

pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;

/// Store-native type of a key, as far as counters care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyType {
    Absent,
    /// Plain string value.
    Scalar,
    /// Any composite type (list, set, hash, ...), by its store name.
    Other(String),
}

impl KeyType {
    /// Interpret a Redis `TYPE` reply.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "none" => KeyType::Absent,
            "string" => KeyType::Scalar,
            other => KeyType::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// Operation applied to a key holding the wrong kind of value.
    #[error("operation against a key holding the wrong kind of value")]
    WrongType,
    /// Increment applied to a string that is not an integer.
    #[error("value is not an integer or out of range")]
    NotAnInteger,
    #[error("backend: {0}")]
    Backend(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl From<StoreError> for PageViewsError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Backend(m) => PageViewsError::StoreUnavailable(m),
            other => PageViewsError::TypeConflict(other.to_string()),
        }
    }
}

/// Capabilities the counter service needs from storage.
///
/// Implementations must be safe for concurrent use; `incr` must be atomic.
#[async_trait]
pub trait KvStore: Send + Sync {
    fn backend(&self) -> &'static str;

    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    async fn key_type(&self, key: &str) -> StoreResult<KeyType>;

    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Returns true when the value was written.
    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool>;

    /// Atomically add 1 and return the new value.
    async fn incr(&self, key: &str) -> StoreResult<i64>;

    /// Set one field of a hash stored at `key`.
    async fn set_field(&self, key: &str, field: &str, value: &str) -> StoreResult<()>;

    async fn ping(&self) -> StoreResult<()>;
}
