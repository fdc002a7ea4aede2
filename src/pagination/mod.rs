//! Pagination module
//!
//! Turns a series of bounded offset/length fetches into one flat, lazily
//! evaluated sequence of items.
//!
//! # Overview
//!
//! - `PagedSequence` - client plus immutable config; re-iterable
//! - `Traversal` - one pass with its own cursor, pulled item by item
//! - `BlockingIter` - the same pass as a synchronous `Iterator`
//!
//! A traversal requests `page_size` records per fetch, shrinking the last
//! request so it never asks for more than a positive limit still allows. It
//! ends when the limit is reached, when the records fetched reach the
//! server's total, or when a page comes back empty.
//!
//! ```rust,ignore
//! use solidafy_paging::client::mock::MemoryFetchClient;
//! use solidafy_paging::{PageConfig, PagedSequence};
//!
//! let client = MemoryFetchClient::new((1..=100).collect::<Vec<u32>>());
//! let config = PageConfig::builder().offset(25).limit(50).build()?;
//! let orders = PagedSequence::new(client, config)?.collect_all().await?;
//! assert_eq!(orders, (26..=75).collect::<Vec<_>>());
//! ```

mod sequence;
mod types;

pub use sequence::{BlockingIter, PagedSequence, Traversal};
pub use types::TraversalStats;
