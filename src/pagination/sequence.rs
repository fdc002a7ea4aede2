//! Paged sequence and its traversals
//!
//! A `PagedSequence` holds the client and an immutable `PageConfig`. Each
//! traversal owns a fresh cursor, pulls items one at a time, and only issues
//! a fetch when its page buffer runs dry.

use super::types::{Cursor, TraversalStats};
use crate::client::FetchClient;
use crate::config::PageConfig;
use crate::error::Result;
use crate::retry::{fetch_with_retry, RetryPolicy};
use futures::stream::{self, Stream, TryStreamExt};
use std::fmt;
use std::iter::FusedIterator;

// ============================================================================
// Paged Sequence
// ============================================================================

/// A lazy, re-iterable sequence of items backed by paged fetches
#[derive(Debug)]
pub struct PagedSequence<C> {
    client: C,
    config: PageConfig,
    retry: RetryPolicy,
}

impl<C: FetchClient> PagedSequence<C> {
    /// Create a sequence with the default retry policy
    pub fn new(client: C, config: PageConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            client,
            config,
            retry: RetryPolicy::default(),
        })
    }

    /// Create a sequence whose retry policy comes from `MAX_RETRIES`
    pub fn from_env(client: C, config: PageConfig) -> Result<Self> {
        let retry = RetryPolicy::from_env()?;
        Ok(Self::new(client, config)?.with_retry_policy(retry))
    }

    /// Set the retry policy
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Get the page config
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Get the retry policy
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Get the fetch client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Start a new traversal from the configured offset
    pub fn traverse(&self) -> Traversal<'_, C> {
        Traversal {
            client: &self.client,
            config: &self.config,
            retry: &self.retry,
            cursor: Cursor::new(),
        }
    }

    /// Start a new traversal as a stream
    pub fn stream(&self) -> impl Stream<Item = Result<C::Item>> + '_ {
        self.traverse().into_stream()
    }

    /// Run a full traversal and collect every item
    pub async fn collect_all(&self) -> Result<Vec<C::Item>> {
        self.stream().try_collect().await
    }

    /// Start a new traversal driven synchronously
    ///
    /// Each pull blocks the calling thread until the next item is available.
    /// Do not call this from inside an async runtime.
    pub fn blocking_iter(&self) -> BlockingIter<'_, C> {
        BlockingIter {
            traversal: self.traverse(),
        }
    }
}

// ============================================================================
// Traversal
// ============================================================================

/// One pass over a paged sequence
pub struct Traversal<'a, C: FetchClient> {
    client: &'a C,
    config: &'a PageConfig,
    retry: &'a RetryPolicy,
    cursor: Cursor<C::Item>,
}

impl<'a, C: FetchClient> Traversal<'a, C> {
    /// Pull the next item, fetching a new page if the buffer is empty
    ///
    /// Returns `Ok(None)` once the sequence has ended. After an error the
    /// traversal is over and every later call returns `Ok(None)`.
    pub async fn next_item(&mut self) -> Result<Option<C::Item>> {
        loop {
            if self.cursor.is_done() {
                return Ok(None);
            }

            if self.cursor.limit_reached(self.config) {
                self.cursor.finish();
                return Ok(None);
            }

            if let Some(item) = self.cursor.next_buffered() {
                return Ok(Some(item));
            }

            if self.cursor.exhausted(self.config) {
                self.cursor.finish();
                return Ok(None);
            }

            if let Err(e) = self.fetch_next_page().await {
                self.cursor.finish();
                return Err(e);
            }

            // Empty page: the backend has nothing more for us
            if self.cursor.page_is_empty() {
                self.cursor.finish();
                return Ok(None);
            }
        }
    }

    async fn fetch_next_page(&mut self) -> Result<()> {
        let request = self.cursor.next_request(self.config)?;
        let result = fetch_with_retry(self.client, &request, self.retry).await?;
        self.cursor.absorb(result);
        Ok(())
    }

    /// Counters of this traversal so far
    pub fn stats(&self) -> TraversalStats {
        self.cursor.stats()
    }

    /// Turn the traversal into a stream of items
    ///
    /// The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<C::Item>> + 'a {
        stream::try_unfold(self, |mut traversal| async move {
            let next = traversal.next_item().await;
            next.map(|item| item.map(|item| (item, traversal)))
        })
    }
}

impl<C: FetchClient> fmt::Debug for Traversal<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("config", self.config)
            .field("retry", self.retry)
            .field("stats", &self.cursor.stats())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Blocking Iterator
// ============================================================================

/// Synchronous iterator over one traversal
pub struct BlockingIter<'a, C: FetchClient> {
    traversal: Traversal<'a, C>,
}

impl<C: FetchClient> BlockingIter<'_, C> {
    /// Counters of the underlying traversal so far
    pub fn stats(&self) -> TraversalStats {
        self.traversal.stats()
    }
}

impl<C: FetchClient> Iterator for BlockingIter<'_, C> {
    type Item = Result<C::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        futures::executor::block_on(self.traversal.next_item()).transpose()
    }
}

impl<C: FetchClient> FusedIterator for BlockingIter<'_, C> {}

impl<C: FetchClient> fmt::Debug for BlockingIter<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingIter")
            .field("traversal", &self.traversal)
            .finish()
    }
}
