//! Pagination cursor and statistics
//!
//! The cursor is the only mutable state of a traversal. It is created fresh
//! for every traversal and never stored on the sequence itself.

use crate::client::{FetchRequest, FetchResult};
use crate::config::PageConfig;
use crate::error::Result;
use std::vec;

/// Counters of a traversal, as seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Records received from the server
    pub records_fetched: u64,
    /// Items handed to the consumer
    pub records_yielded: u64,
    /// Successful fetches (retried attempts count once)
    pub pages_fetched: u32,
    /// Unfiltered total reported by the last page, `None` before the first
    pub records_total: Option<u64>,
    /// Filtered total reported by the last page, `None` before the first
    pub records_filtered: Option<u64>,
    /// Whether the traversal has ended
    pub done: bool,
}

/// Iteration cursor for one traversal
#[derive(Debug)]
pub(crate) struct Cursor<T> {
    page: vec::IntoIter<T>,
    stats: TraversalStats,
}

impl<T> Default for Cursor<T> {
    fn default() -> Self {
        Self {
            page: Vec::new().into_iter(),
            stats: TraversalStats::default(),
        }
    }
}

impl<T> Cursor<T> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn stats(&self) -> TraversalStats {
        self.stats
    }

    pub(crate) fn is_done(&self) -> bool {
        self.stats.done
    }

    /// End the traversal, dropping any unread items
    pub(crate) fn finish(&mut self) {
        self.page = Vec::new().into_iter();
        self.stats.done = true;
    }

    /// Check whether the consumer already received `limit` items
    pub(crate) fn limit_reached(&self, config: &PageConfig) -> bool {
        config
            .positive_limit()
            .is_some_and(|limit| self.stats.records_yielded >= limit)
    }

    /// Take the next unread item of the current page
    pub(crate) fn next_buffered(&mut self) -> Option<T> {
        let item = self.page.next()?;
        self.stats.records_yielded += 1;
        Some(item)
    }

    /// Check whether no further fetch is needed
    ///
    /// True once the records fetched equal the server's unfiltered total, or
    /// a positive limit has been reached. A total the server under-reports
    /// never cuts the traversal short; an empty page ends it instead.
    pub(crate) fn exhausted(&self, config: &PageConfig) -> bool {
        let fetched = self.stats.records_fetched;
        let total_reached = self.stats.records_total == Some(fetched);
        let limit_reached = config.positive_limit().is_some_and(|limit| fetched >= limit);
        total_reached || limit_reached
    }

    /// Build the request for the next page
    ///
    /// Only called while `exhausted` is false, so a positive limit is always
    /// above `records_fetched` and the length is never zero.
    pub(crate) fn next_request(&self, config: &PageConfig) -> Result<FetchRequest> {
        let fetched = self.stats.records_fetched;
        let length = match config.positive_limit() {
            Some(limit) => {
                let remaining = limit.saturating_sub(fetched);
                u32::try_from(remaining).map_or(config.page_size, |r| r.min(config.page_size))
            }
            None => config.page_size,
        };

        FetchRequest::new(
            config.offset.saturating_add(fetched),
            length,
            config.filters.clone(),
        )
    }

    /// Replace the page buffer with a freshly fetched page
    pub(crate) fn absorb(&mut self, result: FetchResult<T>) {
        self.stats.records_fetched += result.items.len() as u64;
        self.stats.records_total = Some(result.records_total);
        self.stats.records_filtered = Some(result.records_filtered);
        self.stats.pages_fetched += 1;
        self.page = result.items.into_iter();
    }

    /// Check whether the current page has no unread items
    pub(crate) fn page_is_empty(&self) -> bool {
        self.page.as_slice().is_empty()
    }
}
