//! # Solidafy Paging
//!
//! Lazy offset/limit pagination over remote listing endpoints.
//!
//! A listing endpoint answers `(offset, length, filters)` with one page of
//! records plus its total counts. This crate turns a series of such bounded
//! fetches into a single flat sequence that honours a caller-side offset and
//! limit, and retries transient connection failures a bounded number of times.
//!
//! ## Features
//!
//! - **Lazy Pagination**: Fetches a page only when the consumer needs it
//! - **Offset and Limit**: Requests shrink so the last fetch never over-asks
//! - **Bounded Retry**: Connection-refused errors are retried, nothing else
//! - **Async or Blocking**: Pull items from a `Stream` or a plain `Iterator`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use solidafy_paging::{PageConfig, PagedSequence, Result};
//!
//! async fn open_orders(client: OrdersApi) -> Result<Vec<Order>> {
//!     let config = PageConfig::builder()
//!         .offset(25)
//!         .limit(50)
//!         .page_size(20)
//!         .filter("status", "open")
//!         .build()?;
//!
//!     PagedSequence::from_env(client, config)?.collect_all().await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                PagedSequence                 │
//! │   traverse() → Traversal   stream()   iter   │
//! └──────────────────────┬───────────────────────┘
//!                        │ next page
//! ┌──────────────────────┴───────────────────────┐
//! │          fetch_with_retry(RetryPolicy)        │
//! └──────────────────────┬───────────────────────┘
//!                        │ one attempt
//! ┌──────────────────────┴───────────────────────┐
//! │     FetchClient::fetch(offset, length, …)     │
//! └──────────────────────────────────────────────┘
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

/// Error types for the crate
pub mod error;

/// Common types and type aliases
pub mod types;

/// Page configuration
pub mod config;

/// Fetch client trait and in-memory doubles
pub mod client;

/// Bounded retry for fetch calls
pub mod retry;

/// Paged sequences and traversals
pub mod pagination;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use client::{FetchClient, FetchRequest, FetchResult};
pub use config::{PageConfig, UNBOUNDED};
pub use pagination::{BlockingIter, PagedSequence, Traversal, TraversalStats};
pub use retry::{fetch_with_retry, RetryPolicy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
