//! Backend connection configuration.
//!
//! Read from `BANDO_*` environment variables; only the base URL is
//! mandatory. Numeric values are validated up front so a typo fails at
//! startup, not mid-retry.

use std::env;

use crate::error::{ClientError, ClientResult};

/// Where and how to reach the analysis backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL, without a trailing slash.
    pub base_url: String,
    /// Optional bearer token.
    pub api_key: Option<String>,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Base delay between retries in milliseconds; doubles per retry.
    pub retry_delay_ms: u64,
}

impl BackendConfig {
    /// Create a config for the given base URL with default tuning.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_base_url(base_url.into()),
            api_key: None,
            timeout_ms: 10_000,
            max_retries: 2,
            retry_delay_ms: 500,
        }
    }

    /// Set the bearer token.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Build from `BANDO_BACKEND_URL`, `BANDO_API_KEY`, `BANDO_TIMEOUT_MS`,
    /// `BANDO_MAX_RETRIES` and `BANDO_RETRY_DELAY_MS`.
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup (injection point for tests).
    pub fn from_lookup<F>(get: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = get("BANDO_BACKEND_URL").ok_or_else(|| ClientError::Config {
            message: "BANDO_BACKEND_URL is not set".into(),
        })?;
        let mut config = Self::new(base_url);
        config.api_key = get("BANDO_API_KEY").filter(|k| !k.is_empty());
        if let Some(raw) = get("BANDO_TIMEOUT_MS") {
            config.timeout_ms = parse_number("BANDO_TIMEOUT_MS", &raw)?;
        }
        if let Some(raw) = get("BANDO_MAX_RETRIES") {
            config.max_retries = parse_number("BANDO_MAX_RETRIES", &raw)?;
        }
        if let Some(raw) = get("BANDO_RETRY_DELAY_MS") {
            config.retry_delay_ms = parse_number("BANDO_RETRY_DELAY_MS", &raw)?;
        }
        Ok(config)
    }
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> ClientResult<T> {
    raw.parse().map_err(|_| ClientError::Config {
        message: format!("{key} must be a number, got {raw:?}"),
    })
}
