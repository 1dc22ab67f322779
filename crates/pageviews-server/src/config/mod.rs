//! Service config loader (strict parsing + env overrides).

pub mod schema;

use std::{env, fs, io::ErrorKind};

use pageviews_core::error::{PageViewsError, Result};

pub use schema::{CountersSection, ServerSection, ServiceConfig, StoreBackend, StoreSection};

/// Env var naming the YAML config file.
pub const CONFIG_PATH_ENV: &str = "PAGEVIEWS_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "pageviews.yaml";

/// Load config from `PAGEVIEWS_CONFIG` (or `pageviews.yaml`), falling back to
/// defaults when the file does not exist, then apply env overrides.
pub fn load() -> Result<ServiceConfig> {
    let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut cfg = match fs::read_to_string(&path) {
        Ok(s) => parse(&s)?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(%path, "config file not found, using defaults");
            ServiceConfig::default()
        }
        Err(e) => return Err(PageViewsError::Config(format!("read config failed: {e}"))),
    };
    apply_overrides(&mut cfg, |k| env::var(k).ok());
    cfg.validate()?;
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<ServiceConfig> {
    let cfg = parse(s)?;
    cfg.validate()?;
    Ok(cfg)
}

fn parse(s: &str) -> Result<ServiceConfig> {
    serde_yaml::from_str(s).map_err(|e| PageViewsError::Config(format!("invalid yaml: {e}")))
}

/// `REDIS_URL` and `PAGEVIEWS_LISTEN` win over the file.
pub fn apply_overrides(cfg: &mut ServiceConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup("REDIS_URL").filter(|v| !v.is_empty()) {
        cfg.store.url = url;
    }
    if let Some(listen) = lookup("PAGEVIEWS_LISTEN").filter(|v| !v.is_empty()) {
        cfg.server.listen = listen;
    }
}
