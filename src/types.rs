//! Common types used throughout Solidafy Paging
//!
//! Shared type aliases used across multiple modules.

use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Server-side filters forwarded verbatim with every fetch
///
/// The crate enforces no schema on keys or values; their meaning is entirely
/// up to the endpoint being paged.
pub type Filters = HashMap<String, JsonValue>;
