//! Debounced profile search with stale-response protection.
//!
//! Every keystroke issues a ticket carrying a monotonic sequence number. A
//! ticket is only acted on while it is the latest one: superseded tickets skip
//! the query after the debounce delay, and responses that arrive after a newer
//! ticket was issued are dropped instead of overwriting fresher results.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::config::SearchConfig;
use crate::error::{remote, CoreResult};
use crate::model::ProfileSummary;
use crate::store::SocialGraph;

/// One issued query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: String,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The trimmed query text.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// Sequence bookkeeping and the currently displayed results.
#[derive(Debug, Clone)]
pub struct SearchController {
    min_query_len: usize,
    limit: u32,
    latest: u64,
    results: Vec<ProfileSummary>,
}

impl SearchController {
    pub fn new(cfg: &SearchConfig) -> Self {
        Self {
            min_query_len: cfg.min_query_len,
            limit: cfg.limit,
            latest: 0,
            results: Vec::new(),
        }
    }

    /// Registers a new query, superseding every earlier ticket.
    ///
    /// Returns `None` (and clears the results) when the trimmed query is too
    /// short to search.
    pub fn issue(&mut self, query: &str) -> Option<SearchTicket> {
        self.latest += 1;
        let query = query.trim();
        if query.chars().count() < self.min_query_len {
            self.results.clear();
            return None;
        }
        Some(SearchTicket {
            seq: self.latest,
            query: query.to_string(),
        })
    }

    pub fn is_current(&self, ticket: &SearchTicket) -> bool {
        ticket.seq == self.latest
    }

    /// Applies `results` if `ticket` is still the latest. Returns whether they were applied.
    pub fn complete(&mut self, ticket: &SearchTicket, results: Vec<ProfileSummary>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.results = results;
        true
    }

    pub fn results(&self) -> &[ProfileSummary] {
        &self.results
    }

    /// What Enter selects: the first hit.
    pub fn first_result(&self) -> Option<&ProfileSummary> {
        self.results.first()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// Async driver: debounce, query the graph, apply only fresh responses.
pub struct SearchBox<G: ?Sized> {
    graph: Arc<G>,
    debounce: Duration,
    controller: Mutex<SearchController>,
}

impl<G: SocialGraph + ?Sized> SearchBox<G> {
    pub fn new(graph: Arc<G>, cfg: &SearchConfig) -> Self {
        Self {
            graph,
            debounce: cfg.debounce(),
            controller: Mutex::new(SearchController::new(cfg)),
        }
    }

    fn with_controller<T>(&self, f: impl FnOnce(&mut SearchController) -> T) -> T {
        let mut guard = self.controller.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Handles a change of the query text.
    ///
    /// Returns `Some(results)` when this query's results are now the displayed
    /// ones (empty for too-short queries) and `None` when a newer query
    /// superseded it.
    pub async fn on_query(&self, query: &str) -> CoreResult<Option<Vec<ProfileSummary>>> {
        let Some(ticket) = self.with_controller(|c| c.issue(query)) else {
            return Ok(Some(Vec::new()));
        };

        tokio::time::sleep(self.debounce).await;
        let (current, limit) = self.with_controller(|c| (c.is_current(&ticket), c.limit()));
        if !current {
            tracing::debug!(seq = ticket.seq, "search superseded before sending");
            return Ok(None);
        }

        let hits = match self.graph.search_profiles(&ticket.query, limit).await {
            Ok(hits) => hits,
            Err(_) if !self.with_controller(|c| c.is_current(&ticket)) => return Ok(None),
            Err(err) => return Err(remote("profile search")(err)),
        };

        if self.with_controller(|c| c.complete(&ticket, hits.clone())) {
            tracing::debug!(seq = ticket.seq, hits = hits.len(), "search results applied");
            Ok(Some(hits))
        } else {
            tracing::warn!(seq = ticket.seq, query = %ticket.query, "stale search response dropped");
            Ok(None)
        }
    }

    pub fn results(&self) -> Vec<ProfileSummary> {
        self.with_controller(|c| c.results().to_vec())
    }

    pub fn first_result(&self) -> Option<ProfileSummary> {
        self.with_controller(|c| c.first_result().cloned())
    }
}
