// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # nearby-pager
//!
//! Client-side pagination for a token-based "nearby search" place lookup
//! service. The service returns at most 20 records per call and an opaque
//! continuation token while more remain; tokens only work after a short
//! activation delay. This crate drives that protocol to completion and hands
//! back every record it gathered.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nearby_pager::{Location, Paginator, PaginationConfig, PlacesClient, SearchRequest};
//!
//! #[tokio::main]
//! async fn main() -> nearby_pager::Result<()> {
//!     let client = PlacesClient::new(std::env::var("PLACES_API_KEY").unwrap_or_default())?;
//!     let request = SearchRequest::within_radius(Location::new(40.7128, -74.006), 1000)
//!         .with_types_csv("hospital,pharmacy");
//!
//!     let result = Paginator::new(PaginationConfig::default())
//!         .fetch_all(&request, &client)
//!         .await;
//!     println!("{} places ({})", result.total(), result.reason);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    CLI (search, show-config)             │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────┬──────────────┴──────────────┬──────────────┐
//! │   Search    │          Pagination         │    Places    │
//! ├─────────────┼─────────────────────────────┼──────────────┤
//! │ Request     │ Paginator session loop      │ PageFetcher  │
//! │ PlaceRecord │ Token activation wait       │ Status map   │
//! │             │ Cap, retries, cancellation  │ HTTP client  │
//! └─────────────┴─────────────────────────────┴──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Search requests and place records
pub mod search;

/// Token-based pagination session
pub mod pagination;

/// HTTP client
pub mod http;

/// Nearby search fetcher
pub mod places;

/// Settings file and API key resolution
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::Settings;
pub use error::{Error, Result};
pub use pagination::{
    CancelHandle, CancelSignal, PageFetcher, PaginationConfig, Paginator, SearchResult,
    TerminalReason,
};
pub use places::PlacesClient;
pub use search::{Location, PlaceRecord, SearchRequest};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
