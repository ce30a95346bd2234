//! Paginated Places Text Search.
//!
//! [`TextSearch`] is a pull-based pager: each call to
//! [`TextSearch::next_result`] yields the next hit, fetching the next page on
//! demand. Google only activates a `next_page_token` a short while after
//! issuing it, so continuation requests are preceded by
//! [`SearchPolicy::page_delay`].

use std::collections::VecDeque;
use std::time::Duration;

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::retry::{retry_bounded, Step};
use crate::types::{ApiStatus, SearchResult, TextSearchResponse};

const ENDPOINT: &str = "textsearch/json";

/// Upper bound on pages fetched for a single query. Text Search stops at 3
/// pages in practice; this guards against a token that never runs out.
pub const MAX_PAGES: usize = 50;

/// Timing and limits for Text Search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Wait before requesting a continuation page.
    pub page_delay: Duration,
    /// Wait after `OVER_QUERY_LIMIT` before retrying the same request.
    pub quota_delay: Duration,
    /// Wait after `INVALID_REQUEST` before retrying the same request.
    pub invalid_request_delay: Duration,
    /// Attempts per page request before the query is abandoned.
    pub max_attempts: u32,
    /// Maximum results emitted for one query.
    pub max_per_query: usize,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            page_delay: Duration::from_secs(2),
            quota_delay: Duration::from_secs(5),
            invalid_request_delay: Duration::from_secs(2),
            max_attempts: 5,
            max_per_query: 180,
        }
    }
}

impl SearchPolicy {
    /// Delay before retrying after `status`, or `None` if the status is
    /// terminal for the query.
    #[must_use]
    pub fn retry_delay(&self, status: &ApiStatus) -> Option<Duration> {
        match status {
            ApiStatus::OverQueryLimit => Some(self.quota_delay),
            ApiStatus::InvalidRequest => Some(self.invalid_request_delay),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
enum PageRequest {
    First,
    Continuation(String),
}

/// Lazy, finite sequence of Text Search results for one query.
///
/// Obtain one with [`PlacesClient::text_search`]. Creating a new pager for
/// the same query starts again from the first page.
pub struct TextSearch<'a> {
    client: &'a PlacesClient,
    query: String,
    policy: SearchPolicy,
    buffered: VecDeque<SearchResult>,
    pending: Option<PageRequest>,
    emitted: usize,
    pages: usize,
}

impl TextSearch<'_> {
    /// Returns the next result, or `None` once the query is exhausted, the
    /// per-query cap is reached, or the query was abandoned.
    ///
    /// Failures never surface here: they are logged and end the sequence.
    pub async fn next_result(&mut self) -> Option<SearchResult> {
        loop {
            if self.emitted >= self.policy.max_per_query {
                self.pending = None;
                self.buffered.clear();
                return None;
            }

            if let Some(item) = self.buffered.pop_front() {
                self.emitted += 1;
                return Some(item);
            }

            let request = self.pending.take()?;

            self.pages += 1;
            if self.pages > MAX_PAGES {
                tracing::warn!(
                    query = %self.query,
                    max_pages = MAX_PAGES,
                    "pagination limit reached, ending query"
                );
                return None;
            }

            let is_continuation = matches!(request, PageRequest::Continuation(_));
            if is_continuation && !self.policy.page_delay.is_zero() {
                tokio::time::sleep(self.policy.page_delay).await;
            }

            match self
                .client
                .fetch_search_page(&self.query, &request, &self.policy)
                .await
            {
                Ok(page) => {
                    tracing::debug!(
                        query = %self.query,
                        page = self.pages,
                        results = page.results.len(),
                        has_next = page.next_page_token.is_some(),
                        "text search page received"
                    );
                    self.pending = page
                        .next_page_token
                        .filter(|t| !t.is_empty())
                        .map(PageRequest::Continuation);
                    self.buffered.extend(page.results);
                }
                Err(err) => {
                    tracing::warn!(
                        query = %self.query,
                        page = self.pages,
                        error = %err,
                        "text search failed, abandoning query"
                    );
                    return None;
                }
            }
        }
    }

    /// Drains the remaining results into a `Vec`.
    pub async fn collect_all(mut self) -> Vec<SearchResult> {
        let mut out = Vec::new();
        while let Some(item) = self.next_result().await {
            out.push(item);
        }
        out
    }
}

impl PlacesClient {
    /// Starts a paginated Text Search for `query`. No request is made until
    /// the first call to [`TextSearch::next_result`].
    #[must_use]
    pub fn text_search(&self, query: &str, policy: &SearchPolicy) -> TextSearch<'_> {
        TextSearch {
            client: self,
            query: query.to_owned(),
            policy: *policy,
            buffered: VecDeque::new(),
            pending: Some(PageRequest::First),
            emitted: 0,
            pages: 0,
        }
    }

    /// Fetches a single Text Search page, retrying quota and invalid-request
    /// statuses within the policy's attempt budget.
    async fn fetch_search_page(
        &self,
        query: &str,
        request: &PageRequest,
        policy: &SearchPolicy,
    ) -> Result<TextSearchResponse, PlacesError> {
        let url = match request {
            PageRequest::First => self.build_url(ENDPOINT, &[("query", query)]),
            PageRequest::Continuation(token) => {
                self.build_url(ENDPOINT, &[("pagetoken", token.as_str())])
            }
        };
        let context = format!("textsearch(query={query})");

        retry_bounded(policy.max_attempts, &context, |_attempt| {
            let url = url.clone();
            let context = context.clone();
            async move {
                let body = match self.request_json(ENDPOINT, &url).await {
                    Ok(body) => body,
                    Err(err) => return Step::Abandon(err),
                };
                let page: TextSearchResponse = match serde_json::from_value(body) {
                    Ok(page) => page,
                    Err(source) => {
                        return Step::Abandon(PlacesError::Deserialize { context, source });
                    }
                };

                match page.status {
                    ApiStatus::Ok | ApiStatus::ZeroResults => Step::Done(page),
                    status => match policy.retry_delay(&status) {
                        Some(delay) => Step::Retry {
                            delay,
                            reason: status.to_string(),
                        },
                        None => Step::Abandon(PlacesError::ApiStatus {
                            status,
                            context,
                            message: page.error_message,
                        }),
                    },
                }
            }
        })
        .await
    }
}
