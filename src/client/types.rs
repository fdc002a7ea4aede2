//! Fetch client types and traits
//!
//! Defines the fetch request, the fixed result shape, and the client trait.

use crate::error::{Error, Result};
use crate::types::{Filters, JsonValue};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

/// One bounded fetch: `length` records starting at `offset`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchRequest {
    /// Absolute offset into the filtered record set
    pub offset: u64,
    /// Number of records requested (always > 0)
    pub length: u32,
    /// Filters forwarded verbatim to the server
    pub filters: Filters,
}

impl FetchRequest {
    /// Create a new fetch request
    pub fn new(offset: u64, length: u32, filters: Filters) -> Result<Self> {
        if length == 0 {
            return Err(Error::invalid_value("length", "must be greater than zero"));
        }
        Ok(Self {
            offset,
            length,
            filters,
        })
    }

    /// Offset one past the last requested record
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(u64::from(self.length))
    }
}

/// One page returned by the server
///
/// The wire shape is `{"data": [...], "records_total": n, "records_filtered": n}`.
/// A missing or `null` data field decodes to an empty page; missing counts are
/// a malformed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct FetchResult<T> {
    /// Items of this page, in server order
    #[serde(
        rename = "data",
        alias = "items",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub items: Vec<T>,

    /// Total records ignoring filters
    #[serde(alias = "recordsTotal")]
    pub records_total: u64,

    /// Total records matching the active filters
    #[serde(alias = "recordsFiltered")]
    pub records_filtered: u64,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T> FetchResult<T> {
    /// Create a new fetch result
    pub fn new(items: Vec<T>, records_total: u64, records_filtered: u64) -> Self {
        Self {
            items,
            records_total,
            records_filtered,
        }
    }

    /// Create an empty page
    pub fn empty(records_total: u64, records_filtered: u64) -> Self {
        Self::new(Vec::new(), records_total, records_filtered)
    }

    /// Check if the page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items in the page
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T: serde::de::DeserializeOwned> FetchResult<T> {
    /// Decode a result from a JSON value
    pub fn from_json(value: JsonValue) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| Error::malformed(e.to_string()))
    }

    /// Decode a result from raw response bytes
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: JsonValue = serde_json::from_slice(body)?;
        Self::from_json(value)
    }
}

/// Performs one bounded remote fetch
///
/// Implementations report transient network trouble as
/// [`Error::Connection`] (or an `Io` error of kind `ConnectionRefused`) so the
/// retry wrapper can tell it apart from everything else.
#[async_trait]
pub trait FetchClient: Send + Sync {
    /// Item type of the listing
    type Item: Send;

    /// Fetch `request.length` records starting at `request.offset`
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResult<Self::Item>>;
}

#[async_trait]
impl<'a, C: FetchClient + ?Sized> FetchClient for &'a C {
    type Item = C::Item;

    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResult<Self::Item>> {
        (**self).fetch(request).await
    }
}

#[async_trait]
impl<C: FetchClient + ?Sized> FetchClient for Arc<C> {
    type Item = C::Item;

    async fn fetch(&self, request: &FetchRequest) -> Result<FetchResult<Self::Item>> {
        (**self).fetch(request).await
    }
}
