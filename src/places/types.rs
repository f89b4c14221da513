//! Wire types for the nearby search endpoint

use crate::pagination::{ContinuationToken, Page, PageStatus};
use crate::search::PlaceRecord;
use crate::types::{JsonValue, OptionStringExt};
use serde::Deserialize;
use std::fmt;

/// Raw JSON body of a nearby search response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NearbySearchResponse {
    /// Result objects; absent on most failures
    #[serde(default)]
    pub results: Option<Vec<JsonValue>>,
    /// Token for the following page
    #[serde(default)]
    pub next_page_token: Option<String>,
    /// Service status string, e.g. `OK`
    #[serde(default)]
    pub status: Option<String>,
    /// Explanation attached to failures
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Status strings the service is known to return
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    Ok,
    ZeroResults,
    InvalidRequest,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
    Other(String),
}

impl ServiceStatus {
    /// Parse a status string; unknown values are kept verbatim
    pub fn parse(status: &str) -> Self {
        match status {
            "OK" => Self::Ok,
            "ZERO_RESULTS" => Self::ZeroResults,
            "INVALID_REQUEST" => Self::InvalidRequest,
            "OVER_QUERY_LIMIT" => Self::OverQueryLimit,
            "REQUEST_DENIED" => Self::RequestDenied,
            "UNKNOWN_ERROR" => Self::UnknownError,
            other => Self::Other(other.to_string()),
        }
    }

    /// Map to a page status
    ///
    /// `INVALID_REQUEST` on a continuation call is how the service reports a
    /// token that is not active yet; on an initial call it means the request
    /// itself is malformed.
    pub fn page_status(&self, continuation: bool) -> PageStatus {
        match self {
            Self::Ok => PageStatus::Ok,
            Self::ZeroResults => PageStatus::ZeroResults,
            Self::InvalidRequest if continuation => PageStatus::InvalidToken,
            Self::OverQueryLimit | Self::UnknownError => PageStatus::TransientError,
            Self::InvalidRequest | Self::RequestDenied | Self::Other(_) => PageStatus::FatalError,
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ok => "OK",
            Self::ZeroResults => "ZERO_RESULTS",
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::OverQueryLimit => "OVER_QUERY_LIMIT",
            Self::RequestDenied => "REQUEST_DENIED",
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::Other(other) => other,
        };
        f.write_str(s)
    }
}

impl NearbySearchResponse {
    /// Convert into a page
    ///
    /// A body with no status but a `results` array is treated as `OK`.
    pub fn into_page(self, continuation: bool) -> Page {
        let status = ServiceStatus::parse(self.status.as_deref().unwrap_or("OK"));

        match status.page_status(continuation) {
            PageStatus::Ok => {
                let Some(results) = self.results else {
                    return Page::fatal("response has no results array");
                };

                let records = results.into_iter().map(PlaceRecord::from).collect();
                let token = self
                    .next_page_token
                    .none_if_empty()
                    .map(ContinuationToken::new);
                Page::ok(records, token)
            }
            PageStatus::ZeroResults => Page::zero_results(),
            other => {
                let detail = match self.error_message {
                    Some(message) => format!("{status}: {message}"),
                    None => status.to_string(),
                };
                Page::failed(other, detail)
            }
        }
    }
}
