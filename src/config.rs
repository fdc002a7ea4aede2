//! Configuration for paged sequences
//!
//! `PageConfig` describes one listing query: where to start, how many items
//! to yield in total, how many to request per fetch, and which server-side
//! filters to forward. It can be built in code or deserialized from JSON.

use crate::error::{Error, Result};
use crate::types::{Filters, JsonValue};
use serde::{Deserialize, Serialize};

/// Limit sentinel meaning "no limit"
///
/// Any limit `<= 0` is treated as unbounded; `-1` is the canonical value.
pub const UNBOUNDED: i64 = -1;

/// Default number of records requested per fetch
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ============================================================================
// Page Config
// ============================================================================

/// Offset, limit, page size and filters for one paged listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Number of matching records to skip before the first yielded item
    #[serde(default)]
    pub offset: u64,

    /// Maximum number of items to yield (`<= 0` means unbounded)
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Number of records requested per fetch
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Server-side filters
    #[serde(default)]
    pub filters: Filters,
}

fn default_limit() -> i64 {
    UNBOUNDED
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: UNBOUNDED,
            page_size: DEFAULT_PAGE_SIZE,
            filters: Filters::new(),
        }
    }
}

impl PageConfig {
    /// Create a new config builder
    pub fn builder() -> PageConfigBuilder {
        PageConfigBuilder::default()
    }

    /// Parse a config from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// The limit as a count, or `None` when unbounded
    pub fn positive_limit(&self) -> Option<u64> {
        u64::try_from(self.limit).ok().filter(|limit| *limit > 0)
    }

    /// Check if the config yields every remaining record
    pub fn is_unbounded(&self) -> bool {
        self.positive_limit().is_none()
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::invalid_value(
                "page_size",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Builder for page config
#[derive(Default)]
pub struct PageConfigBuilder {
    config: PageConfig,
}

impl PageConfigBuilder {
    /// Set the starting offset
    pub fn offset(mut self, offset: u64) -> Self {
        self.config.offset = offset;
        self
    }

    /// Set the limit (`<= 0` means unbounded)
    pub fn limit(mut self, limit: i64) -> Self {
        self.config.limit = limit;
        self
    }

    /// Remove the limit
    pub fn unbounded(mut self) -> Self {
        self.config.limit = UNBOUNDED;
        self
    }

    /// Set the page size
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.config.page_size = page_size;
        self
    }

    /// Add a filter
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.config.filters.insert(key.into(), value.into());
        self
    }

    /// Replace all filters
    pub fn filters(mut self, filters: Filters) -> Self {
        self.config.filters = filters;
        self
    }

    /// Build and validate the config
    pub fn build(self) -> Result<PageConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
