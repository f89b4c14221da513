//! Pagination module
//!
//! Token-based multi-page retrieval for nearby search.
//!
//! # Overview
//!
//! The service returns at most 20 records per page and hands back an opaque
//! continuation token while more pages remain. A token is not usable the
//! moment it is issued, so the `Paginator` waits a configurable activation
//! delay before each continuation fetch and retries once if the service still
//! rejects the token. Sessions stop on exhaustion, at the record cap, on an
//! unrecoverable status, or when the caller cancels; whatever was aggregated
//! up to that point is always returned.
//!
//! ```text
//! Init → Fetching → (AwaitingTokenActivation → Fetching)* → Finished
//! ```

mod cancel;
mod paginator;
mod types;

pub use cancel::{CancelHandle, CancelSignal};
pub use paginator::Paginator;
pub use types::{
    ContinuationToken, Page, PageFetcher, PageQuery, PageStatus, PaginationConfig, SearchResult,
    SessionPhase, SessionState, TerminalReason, DEFAULT_CAP, DEFAULT_MAX_RETRIES,
    DEFAULT_PAGE_DELAY, DEFAULT_RETRY_BACKOFF,
};
