//! Session control loop
//!
//! Drives one search from the initial request through every continuation
//! token until the service runs dry, the cap is hit, a failure outlasts the
//! retry budget, or the caller cancels.

use super::cancel::CancelSignal;
use super::types::{
    Page, PageFetcher, PageStatus, PaginationConfig, SearchResult, SessionPhase, SessionState,
    TerminalReason,
};
use crate::search::SearchRequest;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What the loop does after handling a page
enum Step {
    /// Fetch again after waiting
    Wait(SessionPhase, Duration),
    /// Stop with this reason
    Stop(TerminalReason),
}

/// Drives multi-page retrieval for one search at a time
#[derive(Debug, Clone, Default)]
pub struct Paginator {
    config: PaginationConfig,
}

impl Paginator {
    /// Create a paginator with the given config
    pub fn new(config: PaginationConfig) -> Self {
        Self { config }
    }

    /// Get the config
    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Retrieve every page for `request`
    pub async fn fetch_all(
        &self,
        request: &SearchRequest,
        fetcher: &dyn PageFetcher,
    ) -> SearchResult {
        self.fetch_all_with_cancel(request, fetcher, &CancelSignal::never())
            .await
    }

    /// Retrieve every page for `request`, stopping early if `cancel` fires
    ///
    /// Records gathered before a failure or cancellation are always returned.
    pub async fn fetch_all_with_cancel(
        &self,
        request: &SearchRequest,
        fetcher: &dyn PageFetcher,
        cancel: &CancelSignal,
    ) -> SearchResult {
        let mut session = SessionState::new();
        let reason = self.run(&mut session, request, fetcher, cancel).await;
        let result = session.finish(reason);

        info!(
            records = result.total(),
            pages = result.pages,
            requests = result.requests,
            reason = %result.reason,
            "Search session finished"
        );

        result
    }

    async fn run(
        &self,
        session: &mut SessionState,
        request: &SearchRequest,
        fetcher: &dyn PageFetcher,
        cancel: &CancelSignal,
    ) -> TerminalReason {
        loop {
            if cancel.is_cancelled() {
                return TerminalReason::Cancelled;
            }
            if session.records.len() >= self.config.cap {
                return TerminalReason::CapReached;
            }

            session.phase = SessionPhase::Fetching;
            let query = session.next_query(request);
            debug!(
                continuation = query.is_continuation(),
                attempt = session.retries + 1,
                "Fetching page"
            );

            let page = tokio::select! {
                biased;
                () = cancel.cancelled() => return TerminalReason::Cancelled,
                page = fetcher.fetch_page(query) => page,
            };
            session.requests += 1;

            match self.handle_page(session, page) {
                Step::Stop(reason) => return reason,
                Step::Wait(phase, delay) => {
                    session.phase = phase;
                    tokio::select! {
                        biased;
                        () = cancel.cancelled() => return TerminalReason::Cancelled,
                        () = tokio::time::sleep(delay) => {}
                    }
                }
            }
        }
    }

    fn handle_page(&self, session: &mut SessionState, page: Page) -> Step {
        match page.status {
            PageStatus::Ok | PageStatus::ZeroResults => self.accept_page(session, page),
            PageStatus::FatalError => {
                warn!(detail = ?page.detail, "Page fetch failed permanently");
                session.append(page.records, self.config.cap);
                session.error = page.detail;
                Step::Stop(TerminalReason::Error)
            }
            PageStatus::InvalidToken if session.token.is_none() => {
                warn!(detail = ?page.detail, "Initial request rejected as an invalid token");
                session.error = page.detail;
                Step::Stop(TerminalReason::Error)
            }
            PageStatus::InvalidToken | PageStatus::TransientError => {
                if session.retries >= self.config.max_retries {
                    warn!(
                        status = ?page.status,
                        retries = session.retries,
                        "Retry budget exhausted"
                    );
                    session.error = page.detail.or_else(|| Some(format!("{:?}", page.status)));
                    return Step::Stop(TerminalReason::Error);
                }

                session.retries += 1;
                // A rejected token usually just needs more time to activate.
                let delay = if page.status == PageStatus::InvalidToken {
                    self.config.page_delay
                } else {
                    self.config.retry_backoff
                };
                warn!(
                    status = ?page.status,
                    attempt = session.retries,
                    max_retries = self.config.max_retries,
                    "Retrying in {:?}",
                    delay
                );
                Step::Wait(SessionPhase::Backoff, delay)
            }
        }
    }

    fn accept_page(&self, session: &mut SessionState, page: Page) -> Step {
        let last = page.is_last();
        let Page {
            records,
            next_token,
            ..
        } = page;

        session.consume_token();
        session.pages += 1;

        let received = records.len();
        let truncated = session.append(records, self.config.cap);
        debug!(
            page = session.pages,
            received,
            total = session.records.len(),
            "Page accepted"
        );

        if truncated {
            warn!(
                cap = self.config.cap,
                "Page exceeded record cap, extra records dropped"
            );
            return Step::Stop(TerminalReason::CapReached);
        }

        if last {
            return Step::Stop(TerminalReason::Exhausted);
        }

        if session.records.len() >= self.config.cap {
            return Step::Stop(TerminalReason::CapReached);
        }

        match next_token {
            Some(token) if session.was_consumed(&token) => {
                warn!(token = ?token, "Service reissued a consumed token");
                session.error = Some("service reissued a consumed continuation token".to_string());
                Step::Stop(TerminalReason::Error)
            }
            Some(token) => {
                session.token = Some(token);
                Step::Wait(SessionPhase::AwaitingTokenActivation, self.config.page_delay)
            }
            None => Step::Stop(TerminalReason::Exhausted),
        }
    }
}
