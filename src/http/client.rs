//! HTTP client
//!
//! A thin wrapper over `reqwest` that joins paths onto a base URL, attaches
//! default query parameters (such as the API key) to every call, and turns
//! non-2xx statuses and timeouts into distinct `Error` variants.
//!
//! Requests are never retried here; the paginator owns the retry policy.

use crate::error::{Error, Result};
use crate::types::StringMap;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Clone)]
pub struct HttpClientConfig {
    /// Root that request paths are joined onto
    pub base_url: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Query parameters added to every request
    pub default_query: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            default_query: StringMap::new(),
            user_agent: format!("nearby-pager/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

// Default query values may hold credentials.
impl std::fmt::Debug for HttpClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut query_keys: Vec<_> = self.default_query.keys().collect();
        query_keys.sort();
        f.debug_struct("HttpClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("default_query_keys", &query_keys)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a query parameter sent with every request
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_query.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Query parameters for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, merged over the defaults
    pub query: StringMap,
}

impl RequestConfig {
    /// Create an empty request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add several query parameters
    #[must_use]
    pub fn queries(mut self, params: StringMap) -> Self {
        self.query.extend(params);
        self
    }
}

/// HTTP client with default parameters and error classification
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a client, validating the base URL up front
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        if let Some(base) = &config.base_url {
            url::Url::parse(base)?;
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// GET `path` and return the body as text
    ///
    /// Non-2xx responses become `Error::HttpStatus` carrying the body, and
    /// timeouts become `Error::Timeout`.
    pub async fn get_text(&self, path: &str, request: RequestConfig) -> Result<String> {
        let url = self.build_url(path);

        let mut params = self.config.default_query.clone();
        params.extend(request.query);

        let response = match self.client.get(&url).query(&params).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Err(Error::Timeout {
                    timeout_ms: self.config.timeout.as_millis() as u64,
                });
            }
            // Drop the URL so credentials in the query string never reach logs.
            Err(e) => return Err(Error::Http(e.without_url())),
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        if !status.is_success() {
            debug!(%url, %status, "Request failed");
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!(%url, bytes = body.len(), "Request succeeded");
        Ok(body)
    }

    fn build_url(&self, path: &str) -> String {
        match &self.config.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            ),
            None => path.to_string(),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
