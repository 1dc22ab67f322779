//! In-memory store with Redis-like semantics.
//!
//! Each key lives in a `DashMap` entry, so single-key operations are atomic
//! with respect to each other. Every call (successful or not) bumps an
//! operation counter, which tests use to prove a request never reached
//! storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::{KeyType, KvStore, StoreError, StoreResult};

#[derive(Debug, Clone)]
enum Value {
    Str(String),
    Hash(HashMap<String, String>),
}

#[derive(Default)]
pub struct MemoryStore {
    data: DashMap<String, Value>,
    ops: AtomicU64,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls made so far.
    pub fn ops(&self) -> u64 {
        self.ops.load(Ordering::Relaxed)
    }

    /// Make every subsequent call fail as if the backend were unreachable.
    pub fn set_unavailable(&self, down: bool) {
        self.unavailable.store(down, Ordering::Relaxed);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Read one hash field, without counting as a store call.
    pub fn field(&self, key: &str, field: &str) -> Option<String> {
        match self.data.get(key)?.value() {
            Value::Hash(h) => h.get(field).cloned(),
            Value::Str(_) => None,
        }
    }

    fn enter(&self) -> StoreResult<()> {
        self.ops.fetch_add(1, Ordering::Relaxed);
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(StoreError::Backend("memory store marked unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.enter()?;
        match self.data.get(key).map(|v| v.value().clone()) {
            None => Ok(None),
            Some(Value::Str(s)) => Ok(Some(s)),
            Some(Value::Hash(_)) => Err(StoreError::WrongType),
        }
    }

    async fn key_type(&self, key: &str) -> StoreResult<KeyType> {
        self.enter()?;
        Ok(match self.data.get(key).as_deref() {
            None => KeyType::Absent,
            Some(Value::Str(_)) => KeyType::Scalar,
            Some(Value::Hash(_)) => KeyType::Other("hash".into()),
        })
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.enter()?;
        self.data.insert(key.to_string(), Value::Str(value.to_string()));
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        self.enter()?;
        match self.data.entry(key.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(v) => {
                v.insert(Value::Str(value.to_string()));
                Ok(true)
            }
        }
    }

    async fn incr(&self, key: &str) -> StoreResult<i64> {
        self.enter()?;
        let mut slot = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| Value::Str("0".into()));
        let Value::Str(s) = slot.value_mut() else {
            return Err(StoreError::WrongType);
        };
        let next = s
            .parse::<i64>()
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or(StoreError::NotAnInteger)?;
        *s = next.to_string();
        Ok(next)
    }

    async fn set_field(&self, key: &str, field: &str, value: &str) -> StoreResult<()> {
        self.enter()?;
        let mut slot = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| Value::Hash(HashMap::new()));
        match slot.value_mut() {
            Value::Hash(h) => {
                h.insert(field.to_string(), value.to_string());
                Ok(())
            }
            Value::Str(_) => Err(StoreError::WrongType),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        self.enter()
    }
}
