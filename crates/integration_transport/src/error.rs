//! Transport lookup error types

use thiserror::Error;

/// Errors that can occur while asking the transport service
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection to the transport service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Transport service answered with a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from the transport service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the service)
        retry_after_secs: Option<u64>,
    },

    /// Origin or destination missing
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}
