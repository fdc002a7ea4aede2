//! Error types for Solidafy Paging
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Fetch clients report their failures through the same enum so the retry
//! wrapper can classify them.

use thiserror::Error;

/// The main error type for Solidafy Paging
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    // ============================================================================
    // Fetch Errors
    // ============================================================================
    #[error("Connection refused: {message}")]
    Connection { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Fetch failed: {message}")]
    Fetch { message: String },

    // ============================================================================
    // Result Errors
    // ============================================================================
    #[error("Malformed fetch result: {message}")]
    MalformedResult { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a connection refused error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a generic fetch error
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a malformed result error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResult {
            message: message.into(),
        }
    }

    /// Check if this error is a transient connection failure worth retrying
    ///
    /// Only connection-refused style failures qualify. Timeouts, auth
    /// failures and bad payloads surface on first occurrence.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Connection { .. } => true,
            Error::Io(e) => e.kind() == std::io::ErrorKind::ConnectionRefused,
            _ => false,
        }
    }
}

/// Result type alias for Solidafy Paging
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_value("page_size", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'page_size': must be greater than zero"
        );

        let err = Error::connection("orders.example.com:443");
        assert_eq!(err.to_string(), "Connection refused: orders.example.com:443");
    }

    #[test]
    fn test_is_transient() {
        assert!(Error::connection("refused").is_transient());
        assert!(Error::Io(io::Error::from(io::ErrorKind::ConnectionRefused)).is_transient());

        assert!(!Error::Io(io::Error::from(io::ErrorKind::TimedOut)).is_transient());
        assert!(!Error::Io(io::Error::from(io::ErrorKind::ConnectionReset)).is_transient());
        assert!(!Error::auth("bad token").is_transient());
        assert!(!Error::fetch("HTTP 500").is_transient());
        assert!(!Error::malformed("missing records_total").is_transient());
        assert!(!Error::invalid_value("page_size", "zero").is_transient());
        assert!(!Error::Anyhow(anyhow::anyhow!("boom")).is_transient());
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let err: Error = io::Error::new(io::ErrorKind::ConnectionRefused, "refused").into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_transient());
    }
}
