//! Fetch client module
//!
//! The single I/O boundary of the crate: one bounded fetch of
//! `(offset, length, filters)` returning one page of items plus the server's
//! record counts.
//!
//! # Overview
//!
//! - `FetchClient` - the injectable capability a paged sequence drives
//! - `FetchRequest` / `FetchResult` - the request and the fixed response shape
//! - `mock` - deterministic in-memory doubles for tests and demos

pub mod mock;
mod types;

pub use types::{FetchClient, FetchRequest, FetchResult};
