//! Configuration for the places client and pagination
//!
//! Settings load from a YAML or JSON file (YAML is a superset of JSON, so one
//! parser handles both). Every field has a default, so an empty file is
//! valid:
//!
//! ```yaml
//! api_key: "..."            # optional; usually supplied via env
//! base_url: https://maps.googleapis.com/maps/api/place
//! timeout_ms: 30000
//! log_level: info
//! pagination:
//!   cap: 60
//!   page_delay_ms: 2000
//!   max_retries: 1
//!   retry_backoff_ms: 500
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::pagination::{
    PaginationConfig, DEFAULT_CAP, DEFAULT_MAX_RETRIES, DEFAULT_PAGE_DELAY, DEFAULT_RETRY_BACKOFF,
};
use crate::places::{PlacesClient, DEFAULT_BASE_URL};
use crate::types::{LogLevel, OptionStringExt};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Env vars checked for the API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["PLACES_API_KEY", "API_KEY"];

// ============================================================================
// Settings
// ============================================================================

/// Top-level settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// API key; flag and env vars take precedence
    pub api_key: Option<String>,

    /// Service root
    pub base_url: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Custom user agent
    pub user_agent: Option<String>,

    /// Default log level for the binary
    pub log_level: LogLevel,

    /// Session limits and timings
    pub pagination: PaginationSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: 30_000,
            user_agent: None,
            log_level: LogLevel::default(),
            pagination: PaginationSettings::default(),
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_ms", &self.timeout_ms)
            .field("user_agent", &self.user_agent)
            .field("log_level", &self.log_level)
            .field("pagination", &self.pagination)
            .finish()
    }
}

impl Settings {
    /// Load settings from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse settings from a YAML or JSON string
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_yaml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check values that deserialize fine but cannot work
    pub fn validate(&self) -> Result<()> {
        if self.pagination.cap == 0 {
            return Err(Error::invalid_value(
                "pagination.cap",
                "must be greater than zero",
            ));
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;

        Ok(())
    }

    /// Resolve the API key from the flag, the environment, then the file
    pub fn resolve_api_key(&self, flag: Option<&str>) -> Result<String> {
        self.resolve_api_key_with(flag, |name| std::env::var(name).ok())
    }

    /// Resolve the API key using a custom environment lookup
    pub fn resolve_api_key_with<F>(&self, flag: Option<&str>, env: F) -> Result<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        flag.map(str::to_string)
            .none_if_empty()
            .or_else(|| {
                API_KEY_ENV_VARS
                    .into_iter()
                    .find_map(|name| env(name).none_if_empty())
            })
            .or_else(|| self.api_key.clone().none_if_empty())
            .ok_or_else(|| Error::missing_field("api_key"))
    }

    /// Build a places client from these settings
    pub fn places_client(&self, api_key: impl Into<String>, verbose: bool) -> Result<PlacesClient> {
        let mut builder = PlacesClient::builder(api_key)
            .base_url(&self.base_url)
            .timeout(Duration::from_millis(self.timeout_ms))
            .verbose(verbose);
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }
}

// ============================================================================
// Pagination Settings
// ============================================================================

/// Serialized form of `PaginationConfig`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationSettings {
    /// Maximum records per session
    pub cap: usize,
    /// Token activation delay in milliseconds
    pub page_delay_ms: u64,
    /// Retry budget per request or token
    pub max_retries: u32,
    /// Transient retry backoff in milliseconds
    pub retry_backoff_ms: u64,
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            cap: DEFAULT_CAP,
            page_delay_ms: DEFAULT_PAGE_DELAY.as_millis() as u64,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF.as_millis() as u64,
        }
    }
}

impl From<&PaginationSettings> for PaginationConfig {
    fn from(settings: &PaginationSettings) -> Self {
        PaginationConfig::new()
            .with_cap(settings.cap)
            .with_page_delay(Duration::from_millis(settings.page_delay_ms))
            .with_max_retries(settings.max_retries)
            .with_retry_backoff(Duration::from_millis(settings.retry_backoff_ms))
    }
}
