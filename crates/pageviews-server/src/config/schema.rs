use serde::Deserialize;
use pageviews_core::error::{PageViewsError, Result};
use pageviews_core::PathRule;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub counters: CountersSection,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            store: StoreSection::default(),
            counters: CountersSection::default(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PageViewsError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.store.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(PageViewsError::Config(format!(
                "server.listen must be a valid socket address, got {:?}",
                self.listen
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Redis,
    Memory,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    #[serde(default)]
    pub backend: StoreBackend,

    #[serde(default = "default_redis_url")]
    pub url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: default_redis_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if !(10..=30000).contains(&self.timeout_ms) {
            return Err(PageViewsError::Config(
                "store.timeout_ms must be between 10 and 30000".into(),
            ));
        }
        if self.backend == StoreBackend::Redis
            && !(self.url.starts_with("redis://")
                || self.url.starts_with("rediss://")
                || self.url.starts_with("redis+unix://"))
        {
            return Err(PageViewsError::Config(
                "store.url must use the redis://, rediss:// or redis+unix:// scheme".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountersSection {
    #[serde(default)]
    pub path_rule: PathRule,

    #[serde(default = "default_true")]
    pub record_updated_at: bool,
}

impl Default for CountersSection {
    fn default() -> Self {
        Self {
            path_rule: PathRule::default(),
            record_updated_at: true,
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".into()
}
fn default_redis_url() -> String {
    "redis://localhost:6379".into()
}
fn default_timeout_ms() -> u64 {
    500
}
fn default_true() -> bool {
    true
}
