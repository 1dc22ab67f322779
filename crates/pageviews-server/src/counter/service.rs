use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};
use tracing::{debug, warn};

use pageviews_core::error::{PageViewsError, Result};
use pageviews_core::{CounterPath, PathRule};

use crate::store::{KeyType, KvStore, StoreResult};

/// Hash field written under the companion key after each increment.
pub const UPDATED_AT_FIELD: &str = "updated_at";

/// Read and increment per-path view counters.
///
/// Stateless apart from the shared store handle; clones share the handle.
#[derive(Clone)]
pub struct CounterService {
    store: Arc<dyn KvStore>,
    rule: PathRule,
    timeout: Duration,
    record_updated_at: bool,
}

impl CounterService {
    pub fn new(store: Arc<dyn KvStore>, rule: PathRule, timeout: Duration) -> Self {
        Self {
            store,
            rule,
            timeout,
            record_updated_at: true,
        }
    }

    pub fn with_updated_at(mut self, enabled: bool) -> Self {
        self.record_updated_at = enabled;
        self
    }

    pub fn path_rule(&self) -> PathRule {
        self.rule
    }

    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    /// Current count for `path`. Absent or non-numeric values read as 0.
    pub async fn get_count(&self, path: Option<&str>) -> Result<u64> {
        let path = CounterPath::parse(path, self.rule)?;
        let raw = self.bounded(self.store.get(path.as_str())).await?;
        Ok(raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(0))
    }

    /// Add one view to `path`, creating the counter on first use.
    pub async fn increment(&self, path: Option<&str>) -> Result<()> {
        let path = CounterPath::parse(path, self.rule)?;
        let key = path.as_str();

        match self.bounded(self.store.key_type(key)).await? {
            KeyType::Scalar => {}
            KeyType::Absent => {
                // `false` means a concurrent increment created the key first.
                self.bounded(self.store.set_if_absent(key, "0")).await?;
            }
            KeyType::Other(kind) => {
                return Err(PageViewsError::TypeConflict(format!(
                    "{key} holds a {kind}, not a counter"
                )));
            }
        }

        let count = self.bounded(self.store.incr(key)).await?;
        debug!(path = %key, count, "counter incremented");

        if self.record_updated_at {
            self.touch(&path).await;
        }
        Ok(())
    }

    /// Best-effort metadata write; never fails the increment.
    async fn touch(&self, path: &CounterPath) {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let meta = path.meta_key();
        if let Err(e) = self
            .bounded(self.store.set_field(&meta, UPDATED_AT_FIELD, &now))
            .await
        {
            warn!(path = %path, error = %e, "failed to record updated_at");
        }
    }

    async fn bounded<T>(&self, fut: impl Future<Output = StoreResult<T>>) -> Result<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(r) => r.map_err(PageViewsError::from),
            Err(_) => Err(PageViewsError::StoreUnavailable(format!(
                "{} call exceeded {}ms",
                self.store.backend(),
                self.timeout.as_millis()
            ))),
        }
    }
}
