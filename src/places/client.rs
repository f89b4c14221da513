//! Nearby search page fetcher over HTTP

use super::types::NearbySearchResponse;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{Page, PageFetcher, PageQuery};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Default service root
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Nearby search endpoint, relative to the base URL
pub const NEARBY_SEARCH_PATH: &str = "/nearbysearch/json";

/// Builder for `PlacesClient`
#[derive(Debug, Clone)]
pub struct PlacesClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    verbose: bool,
}

impl PlacesClientBuilder {
    /// Override the service root
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Log raw response bodies at debug level
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<PlacesClient> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field("api_key"));
        }

        let mut http = HttpClientConfig::builder()
            .base_url(self.base_url)
            .timeout(self.timeout)
            .query("key", self.api_key);
        if let Some(agent) = self.user_agent {
            http = http.user_agent(agent);
        }

        Ok(PlacesClient {
            http: HttpClient::with_config(http.build())?,
            verbose: self.verbose,
        })
    }
}

/// Fetches nearby search pages from the places service
#[derive(Debug)]
pub struct PlacesClient {
    http: HttpClient,
    verbose: bool,
}

impl PlacesClient {
    /// Create a client for the default service root
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Start building a client
    pub fn builder(api_key: impl Into<String>) -> PlacesClientBuilder {
        PlacesClientBuilder {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: None,
            verbose: false,
        }
    }

    /// Fetch one page, surfacing transport failures as errors
    pub async fn fetch(&self, query: PageQuery<'_>) -> Result<Page> {
        let request = match query {
            PageQuery::Initial(search) => RequestConfig::new().queries(search.query_params()),
            PageQuery::Continuation(token) => RequestConfig::new().query("pagetoken", token.as_str()),
        };

        let body = self.http.get_text(NEARBY_SEARCH_PATH, request).await?;

        if self.verbose {
            debug!(body = %body, "Raw nearby search response");
        }

        let response: NearbySearchResponse =
            serde_json::from_str(&body).map_err(|e| Error::decode(e.to_string()))?;

        Ok(response.into_page(query.is_continuation()))
    }
}

#[async_trait]
impl PageFetcher for PlacesClient {
    async fn fetch_page(&self, query: PageQuery<'_>) -> Page {
        match self.fetch(query).await {
            Ok(page) => page,
            Err(e) => {
                warn!(error = %e, "Nearby search request failed");
                classify_error(&e)
            }
        }
    }
}

/// Map a transport error to a failed page
pub fn classify_error(error: &Error) -> Page {
    if error.is_retryable() {
        Page::transient(error.to_string())
    } else {
        Page::fatal(error.to_string())
    }
}
