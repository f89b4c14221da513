//! Places service fetcher
//!
//! `PlacesClient` implements `PageFetcher` against the nearby search JSON
//! endpoint. It owns the wire format and the mapping from service statuses
//! and transport failures to `PageStatus`:
//!
//! | Source                                  | Page status       |
//! |-----------------------------------------|-------------------|
//! | `OK`                                    | `Ok`              |
//! | `ZERO_RESULTS`                          | `ZeroResults`     |
//! | `INVALID_REQUEST` with a page token     | `InvalidToken`    |
//! | `OVER_QUERY_LIMIT`, `UNKNOWN_ERROR`     | `TransientError`  |
//! | HTTP 429/5xx, timeout, connect failure  | `TransientError`  |
//! | anything else                           | `FatalError`      |

mod client;
mod types;

pub use client::{
    classify_error, PlacesClient, PlacesClientBuilder, DEFAULT_BASE_URL, NEARBY_SEARCH_PATH,
};
pub use types::{NearbySearchResponse, ServiceStatus};

#[cfg(test)]
mod tests;
