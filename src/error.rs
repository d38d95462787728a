//! Error types for the search pipeline.

use thiserror::Error;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body is not text.
    #[error("Unsupported content type '{content_type}' for {url}")]
    UnsupportedContent { content_type: String, url: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Request timeout exceeded.
    #[error("Request timeout exceeded")]
    Timeout,

    /// Invalid query.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Cache I/O error.
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache entry could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Every attempt to reach the provider failed.
    #[error("Search provider unavailable after {attempts} attempt(s): {source}")]
    ProviderUnavailable {
        attempts: u32,
        #[source]
        source: Box<SearchError>,
    },
}
