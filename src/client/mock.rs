//! In-memory fetch clients
//!
//! Deterministic doubles for the remote listing endpoint. They derive every
//! page from their inputs, so tests can assert exact items and call counts
//! without a network.

use super::types::{FetchClient, FetchRequest, FetchResult};
use crate::error::{Error, Result};
use crate::types::Filters;
use async_trait::async_trait;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Predicate deciding whether a record matches the active filters
pub type FilterFn<T> = Arc<dyn Fn(&T, &Filters) -> bool + Send + Sync>;

// ============================================================================
// Memory Fetch Client
// ============================================================================

/// Serves pages sliced from an ordered in-memory record set
///
/// `records_total` is the size of the full set (or an explicit override) and
/// `records_filtered` the number of records the filter predicate accepts.
/// Without a predicate every record matches and filters are only recorded.
pub struct MemoryFetchClient<T> {
    records: Vec<T>,
    records_total: Option<u64>,
    filter: Option<FilterFn<T>>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl<T: Clone + Send + Sync> MemoryFetchClient<T> {
    /// Create a client over the given records
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            records_total: None,
            filter: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Report a fixed unfiltered total instead of the record count
    #[must_use]
    pub fn with_records_total(mut self, total: u64) -> Self {
        self.records_total = Some(total);
        self
    }

    /// Apply a predicate when the request carries filters
    #[must_use]
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&T, &Filters) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Every request served so far, in order
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of fetch calls served so far
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn matching(&self, filters: &Filters) -> Vec<&T> {
        match &self.filter {
            Some(filter) if !filters.is_empty() => self
                .records
                .iter()
                .filter(|record| filter(record, filters))
                .collect(),
            _ => self.records.iter().collect(),
        }
    }
}

#[async_trait]
impl<T: Clone + Send + Sync> FetchClient for MemoryFetchClient<T> {
    type Item = T;

    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResult<T>> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let matching = self.matching(&request.filters);
        let items = matching
            .iter()
            .skip(usize::try_from(request.offset).unwrap_or(usize::MAX))
            .take(request.length as usize)
            .map(|record| (*record).clone())
            .collect();

        Ok(FetchResult::new(
            items,
            self.records_total.unwrap_or(self.records.len() as u64),
            matching.len() as u64,
        ))
    }
}

impl<T> fmt::Debug for MemoryFetchClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryFetchClient")
            .field("records", &self.records.len())
            .field("records_total", &self.records_total)
            .field("has_filter", &self.filter.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Failing Fetch Client
// ============================================================================

/// Fails every call
///
/// Defaults to a connection refused error, which the retry wrapper treats as
/// transient.
pub struct FailingFetchClient<T> {
    make_error: fn() -> Error,
    attempts: AtomicU32,
    _item: PhantomData<fn() -> T>,
}

impl<T> FailingFetchClient<T> {
    /// Fail with a connection refused error
    pub fn connection_refused() -> Self {
        Self::with_error(|| Error::connection("Connection refused"))
    }

    /// Fail with the error produced by `make_error`
    pub fn with_error(make_error: fn() -> Error) -> Self {
        Self {
            make_error,
            attempts: AtomicU32::new(0),
            _item: PhantomData,
        }
    }

    /// Number of fetch attempts made so far
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<T: Send> FetchClient for FailingFetchClient<T> {
    type Item = T;

    async fn fetch(&self, _request: &FetchRequest) -> Result<FetchResult<T>> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err((self.make_error)())
    }
}

impl<T> fmt::Debug for FailingFetchClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailingFetchClient")
            .field("attempts", &self.attempts())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Flaky Fetch Client
// ============================================================================

/// Refuses the first `failures` calls, then delegates to the inner client
#[derive(Debug)]
pub struct FlakyFetchClient<C> {
    inner: C,
    failures: u32,
    attempts: AtomicU32,
}

impl<C> FlakyFetchClient<C> {
    /// Wrap `inner`, refusing the first `failures` calls
    pub fn new(inner: C, failures: u32) -> Self {
        Self {
            inner,
            failures,
            attempts: AtomicU32::new(0),
        }
    }

    /// Number of fetch attempts made so far, failed ones included
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// The wrapped client
    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: FetchClient> FetchClient for FlakyFetchClient<C> {
    type Item = C::Item;

    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResult<Self::Item>> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            return Err(Error::connection(format!(
                "Connection refused (attempt {})",
                attempt + 1
            )));
        }
        self.inner.fetch(request).await
    }
}
