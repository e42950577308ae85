//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// External service did not answer in time
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout that elapsed
        timeout_secs: u64,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Request is malformed and was not sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
