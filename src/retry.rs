//! Bounded retry for fetch calls
//!
//! Wraps a single fetch in a retry loop that only retries transient
//! connection failures. Retries are immediate and sequential; every other
//! error surfaces on its first occurrence.

use crate::client::{FetchClient, FetchRequest, FetchResult};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Environment variable holding the maximum number of fetch attempts
pub const MAX_RETRIES_ENV: &str = "MAX_RETRIES";

/// Default maximum number of fetch attempts
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Retry policy configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the initial attempt
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl RetryPolicy {
    /// Create a policy allowing `max_attempts` attempts in total
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }

    /// Read the policy from the `MAX_RETRIES` environment variable
    pub fn from_env() -> Result<Self> {
        Self::from_env_value(std::env::var(MAX_RETRIES_ENV).ok().as_deref())
    }

    /// Build the policy from a raw `MAX_RETRIES` value
    ///
    /// Absent or blank values fall back to the default.
    pub fn from_env_value(value: Option<&str>) -> Result<Self> {
        match value.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => Ok(Self::default()),
            Some(raw) => raw.parse::<u32>().map(Self::new).map_err(|e| {
                Error::invalid_value(
                    MAX_RETRIES_ENV,
                    format!("expected a non-negative integer, got '{raw}': {e}"),
                )
            }),
        }
    }

    /// Effective number of attempts (a fetch is always tried at least once)
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Decide whether a failed attempt (1-based) should be retried
    pub fn should_retry(&self, error: &Error, attempt: u32) -> bool {
        error.is_transient() && attempt < self.attempts()
    }
}

/// Fetch one page, retrying transient failures per `policy`
///
/// Returns the first successful result as-is, empty pages included. Once the
/// attempts are used up the last error is returned unchanged.
pub async fn fetch_with_retry<C>(
    client: &C,
    request: &FetchRequest,
    policy: &RetryPolicy,
) -> Result<FetchResult<C::Item>>
where
    C: FetchClient + ?Sized,
{
    let max_attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        debug!(
            "Fetching offset {} length {}, attempt {}/{}",
            request.offset, request.length, attempt, max_attempts
        );

        match client.fetch(request).await {
            Ok(result) => return Ok(result),
            Err(e) if policy.should_retry(&e, attempt) => {
                warn!(
                    "Connection error, attempt {}/{}, retrying: {}",
                    attempt, max_attempts, e
                );
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
