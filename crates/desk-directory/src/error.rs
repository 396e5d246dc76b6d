//! Directory error types.

use thiserror::Error;

/// Errors that can occur when talking to the Slack Web API.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API answered `ok: false` with this error code.
    #[error("Slack error: {0}")]
    Slack(String),

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a response payload.
    #[error("parse error: {0}")]
    Parse(String),

    /// The directory has no usable name for this identifier.
    #[error("no name found for {0}")]
    NotFound(String),

    /// A channel or timestamp argument was rejected before any call.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
