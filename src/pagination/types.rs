//! Pagination types and traits
//!
//! Defines the page, token and session abstractions shared by the paginator
//! and by every `PageFetcher` implementation.

use crate::search::{PlaceRecord, SearchRequest};
use async_trait::async_trait;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Maximum records a session aggregates unless overridden
pub const DEFAULT_CAP: usize = 60;

/// Wait before a freshly issued token is used
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(2000);

/// Retry budget per request or token
pub const DEFAULT_MAX_RETRIES: u32 = 1;

/// Wait before retrying a transient failure
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

// ============================================================================
// Continuation Token
// ============================================================================

/// Opaque, single-use handle for the next page
///
/// The service issues a token with each non-final page. It only becomes
/// usable a short while after issuance, and it must never be presented again
/// once it has produced a page, so the type is not `Clone`.
pub struct ContinuationToken {
    value: String,
    issued_at: Instant,
}

impl ContinuationToken {
    /// Wrap a token value, stamping it as issued now
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            issued_at: Instant::now(),
        }
    }

    /// The raw token value for the wire
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Time since the token was received
    pub fn age(&self) -> Duration {
        self.issued_at.elapsed()
    }
}

impl PartialEq for ContinuationToken {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for ContinuationToken {}

// Tokens are credentials of a sort; keep them short in logs.
impl fmt::Debug for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuationToken")
            .field("value", &abbreviate(&self.value))
            .field("age", &self.age())
            .finish()
    }
}

fn abbreviate(value: &str) -> String {
    if value.chars().count() <= 12 {
        value.to_string()
    } else {
        let head: String = value.chars().take(8).collect();
        format!("{head}…")
    }
}

// ============================================================================
// Page
// ============================================================================

/// Classification of a single fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// Records returned
    Ok,
    /// Nothing matched; normal end of the session
    ZeroResults,
    /// The token was rejected, usually because it is not active yet
    InvalidToken,
    /// Temporary failure worth retrying
    TransientError,
    /// Permanent failure
    FatalError,
}

impl PageStatus {
    /// Check if this status carries usable records
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok | Self::ZeroResults)
    }
}

/// One response unit from the service
#[derive(Debug)]
pub struct Page {
    /// Records in service order
    pub records: Vec<PlaceRecord>,
    /// Token for the following page, if any
    pub next_token: Option<ContinuationToken>,
    /// Fetch classification
    pub status: PageStatus,
    /// Failure detail from the service or transport
    pub detail: Option<String>,
}

impl Page {
    /// A successful page
    pub fn ok(records: Vec<PlaceRecord>, next_token: Option<ContinuationToken>) -> Self {
        Self {
            records,
            next_token,
            status: PageStatus::Ok,
            detail: None,
        }
    }

    /// An empty, final page
    pub fn zero_results() -> Self {
        Self {
            records: Vec::new(),
            next_token: None,
            status: PageStatus::ZeroResults,
            detail: None,
        }
    }

    /// A failed page with the given status
    pub fn failed(status: PageStatus, detail: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            next_token: None,
            status,
            detail: Some(detail.into()),
        }
    }

    /// The token was rejected
    pub fn invalid_token(detail: impl Into<String>) -> Self {
        Self::failed(PageStatus::InvalidToken, detail)
    }

    /// A temporary failure
    pub fn transient(detail: impl Into<String>) -> Self {
        Self::failed(PageStatus::TransientError, detail)
    }

    /// A permanent failure
    pub fn fatal(detail: impl Into<String>) -> Self {
        Self::failed(PageStatus::FatalError, detail)
    }

    /// Check if this page ends the session normally
    pub fn is_last(&self) -> bool {
        self.status == PageStatus::ZeroResults || self.next_token.is_none()
    }
}

// ============================================================================
// Page Fetcher
// ============================================================================

/// What a single fetch should retrieve
#[derive(Debug, Clone, Copy)]
pub enum PageQuery<'a> {
    /// The first page of a search
    Initial(&'a SearchRequest),
    /// A follow-up page
    Continuation(&'a ContinuationToken),
}

impl PageQuery<'_> {
    /// Check if this is a continuation query
    pub fn is_continuation(&self) -> bool {
        matches!(self, Self::Continuation(_))
    }
}

/// Transport seam: performs one remote call per invocation
///
/// Implementations must classify every transport and service failure into a
/// `PageStatus`; the paginator never looks at the underlying cause.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch one page
    async fn fetch_page(&self, query: PageQuery<'_>) -> Page;
}

// ============================================================================
// Configuration
// ============================================================================

/// Session limits and timings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Maximum records to aggregate
    pub cap: usize,
    /// Wait before presenting a newly issued token
    pub page_delay: Duration,
    /// Retries per request or token for retryable statuses
    pub max_retries: u32,
    /// Wait before retrying a transient failure
    pub retry_backoff: Duration,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            cap: DEFAULT_CAP,
            page_delay: DEFAULT_PAGE_DELAY,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl PaginationConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record cap
    #[must_use]
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Set the token activation delay
    #[must_use]
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Set the retry budget
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the transient retry backoff
    #[must_use]
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }
}

// ============================================================================
// Session
// ============================================================================

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalReason {
    /// The service had no more pages
    Exhausted,
    /// The record cap was reached
    CapReached,
    /// An unrecoverable status, or retries ran out
    Error,
    /// The caller cancelled the session
    Cancelled,
}

impl fmt::Display for TerminalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Exhausted => "exhausted",
            Self::CapReached => "cap reached",
            Self::Error => "error",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Nothing fetched yet
    Init,
    /// A fetch is in flight
    Fetching,
    /// Waiting for a new token to become usable
    AwaitingTokenActivation,
    /// Waiting before a retry
    Backoff,
    /// Terminal
    Finished(TerminalReason),
}

impl SessionPhase {
    /// Check if the session has stopped
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

/// Progress of one session, owned by a single `fetch_all` call
#[derive(Debug)]
pub struct SessionState {
    /// Records aggregated so far
    pub records: Vec<PlaceRecord>,
    /// Token for the next fetch
    pub token: Option<ContinuationToken>,
    /// Token values that already produced a page
    pub consumed: HashSet<String>,
    /// Retries spent on the current request or token
    pub retries: u32,
    /// Pages accepted
    pub pages: usize,
    /// Fetch calls issued, including failed ones
    pub requests: usize,
    /// Current phase
    pub phase: SessionPhase,
    /// Detail of the failure that ended the session
    pub error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            token: None,
            consumed: HashSet::new(),
            retries: 0,
            pages: 0,
            requests: 0,
            phase: SessionPhase::Init,
            error: None,
        }
    }
}

impl SessionState {
    /// Create a fresh session
    pub fn new() -> Self {
        Self::default()
    }

    /// The query for the next fetch
    pub fn next_query<'a>(&'a self, request: &'a SearchRequest) -> PageQuery<'a> {
        match &self.token {
            Some(token) => PageQuery::Continuation(token),
            None => PageQuery::Initial(request),
        }
    }

    /// Record that the current token produced a page and drop it
    pub fn consume_token(&mut self) {
        if let Some(token) = self.token.take() {
            self.consumed.insert(token.value);
        }
        self.retries = 0;
    }

    /// Check if a token value already produced a page
    pub fn was_consumed(&self, token: &ContinuationToken) -> bool {
        self.consumed.contains(token.as_str())
    }

    /// Append records, truncating at `cap`; returns true if any were dropped
    pub fn append(&mut self, records: Vec<PlaceRecord>, cap: usize) -> bool {
        let room = cap.saturating_sub(self.records.len());
        let dropped = records.len() > room;
        self.records.extend(records.into_iter().take(room));
        dropped
    }

    /// Close the session and move the aggregate out into a result
    ///
    /// Any unused token is discarded.
    pub fn finish(&mut self, reason: TerminalReason) -> SearchResult {
        self.phase = SessionPhase::Finished(reason);
        self.token = None;
        SearchResult {
            records: std::mem::take(&mut self.records),
            reason,
            pages: self.pages,
            requests: self.requests,
            error: self.error.take(),
        }
    }
}

// ============================================================================
// Search Result
// ============================================================================

/// Aggregate of one session
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// All records in page order, not de-duplicated
    pub records: Vec<PlaceRecord>,
    /// Why the session stopped
    pub reason: TerminalReason,
    /// Pages accepted
    pub pages: usize,
    /// Fetch calls issued
    pub requests: usize,
    /// Failure detail when `reason` is `Error`
    pub error: Option<String>,
}

impl SearchResult {
    /// Number of records
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Check if no records were collected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check if the session ended without error or cancellation
    pub fn is_complete(&self) -> bool {
        matches!(
            self.reason,
            TerminalReason::Exhausted | TerminalReason::CapReached
        )
    }
}
