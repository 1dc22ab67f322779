//! Counter path validation.
//!
//! A counter is keyed by the raw path string the client sends. Which paths are
//! accepted is a deployment-wide decision (`PathRule`); GET and PUT apply the
//! same rule.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::error::{PageViewsError, Result};

/// Longest path accepted as a counter key, in bytes.
pub const MAX_PATH_BYTES: usize = 1024;

static DATE_SLUG: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^/posts/[0-9]{4}/[0-9]{2}/[0-9]{2}/[^/]+/$").ok());

/// Which path shapes are accepted as counter keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathRule {
    /// `/posts/YYYY/MM/DD/<slug>/`, ASCII digits, trailing slash required.
    #[default]
    DateSlug,
    /// Any non-empty string.
    NonEmpty,
}

impl PathRule {
    fn accepts(self, path: &str) -> bool {
        match self {
            PathRule::NonEmpty => true,
            // A regex that failed to compile accepts nothing.
            PathRule::DateSlug => DATE_SLUG.as_ref().is_some_and(|re| re.is_match(path)),
        }
    }
}

/// A validated counter key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterPath(String);

impl CounterPath {
    /// Validate a raw `path` value. `None` means the parameter was absent.
    pub fn parse(raw: Option<&str>, rule: PathRule) -> Result<Self> {
        let path = match raw {
            Some(p) if !p.is_empty() => p,
            _ => return Err(PageViewsError::InvalidArgument("Path parameter is required".into())),
        };
        if path.len() > MAX_PATH_BYTES {
            return Err(PageViewsError::InvalidArgument(format!(
                "Path parameter exceeds {MAX_PATH_BYTES} bytes"
            )));
        }
        if !rule.accepts(path) {
            return Err(PageViewsError::InvalidArgument(
                "Path parameter must look like /posts/YYYY/MM/DD/<slug>/".into(),
            ));
        }
        Ok(Self(path.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Companion key holding update metadata for this counter.
    pub fn meta_key(&self) -> String {
        format!("{}:meta", self.0)
    }
}

impl fmt::Display for CounterPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CounterPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn meta_key_is_suffixed() {
        let p = CounterPath::parse(Some("/posts/2024/01/02/hello/"), PathRule::DateSlug).unwrap();
        assert_eq!(p.meta_key(), "/posts/2024/01/02/hello/:meta");
    }

    #[test]
    fn meta_key_never_matches_date_slug() {
        let p = CounterPath::parse(Some("/posts/2024/01/02/hello/"), PathRule::DateSlug).unwrap();
        assert!(CounterPath::parse(Some(p.meta_key().as_str()), PathRule::DateSlug).is_err());
    }
}
