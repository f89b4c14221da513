//! HTTP client module
//!
//! Provides a thin HTTP client used by page fetchers.
//!
//! # Features
//!
//! - **Default parameters**: query parameters (such as an API key) applied to
//!   every request
//! - **Error classification**: non-2xx statuses, timeouts and transport errors
//!   map to distinct `Error` variants so callers can tell retryable failures
//!   from permanent ones

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
