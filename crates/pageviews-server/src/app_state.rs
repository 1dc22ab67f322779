//! Shared application state.
//!
//! Built once at startup and cloned into every handler. The store handle is
//! injected here so tests can swap in `MemoryStore`.

use std::sync::Arc;
use std::time::Duration;

use pageviews_core::error::{PageViewsError, Result};

use crate::config::{ServiceConfig, StoreBackend};
use crate::counter::CounterService;
use crate::obs::ServiceMetrics;
use crate::store::{KvStore, MemoryStore, RedisStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServiceConfig,
    counters: CounterService,
    metrics: ServiceMetrics,
}

impl AppState {
    /// Connect the configured backend and build state.
    pub async fn connect(cfg: ServiceConfig) -> Result<Self> {
        let store: Arc<dyn KvStore> = match cfg.store.backend {
            StoreBackend::Redis => Arc::new(
                RedisStore::connect(&cfg.store.url)
                    .await
                    .map_err(|e| PageViewsError::Config(format!("redis connect failed: {e}")))?,
            ),
            StoreBackend::Memory => {
                tracing::warn!("using in-memory store; counters are lost on restart");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(Self::with_store(cfg, store))
    }

    /// Build state around an existing store handle.
    pub fn with_store(cfg: ServiceConfig, store: Arc<dyn KvStore>) -> Self {
        let counters = CounterService::new(
            store,
            cfg.counters.path_rule,
            Duration::from_millis(cfg.store.timeout_ms),
        )
        .with_updated_at(cfg.counters.record_updated_at);

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                counters,
                metrics: ServiceMetrics::default(),
            }),
        }
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn counters(&self) -> &CounterService {
        &self.inner.counters
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.inner.metrics
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }
}
