//! Error types for the explorer client

use thiserror::Error;

/// Error type for explorer API operations
#[derive(Debug, Error, Clone)]
pub enum ExplorerClientError {
    /// An error executing an HTTP request
    #[error("HTTP error: {0}")]
    Http(String),

    /// An error parsing a response body
    #[error("Parsing error: {0}")]
    Parse(String),

    /// An error reported by the explorer API envelope
    #[error("Explorer API error: {0}")]
    Api(String),

    /// A miscellaneous error
    #[error("Custom error: {0}")]
    Custom(String),
}

impl ExplorerClientError {
    /// Create a new HTTP error
    #[allow(clippy::needless_pass_by_value)]
    pub fn http<T: ToString>(msg: T) -> Self {
        Self::Http(msg.to_string())
    }

    /// Create a new parsing error
    #[allow(clippy::needless_pass_by_value)]
    pub fn parse<T: ToString>(msg: T) -> Self {
        Self::Parse(msg.to_string())
    }

    /// Create a new API error
    #[allow(clippy::needless_pass_by_value)]
    pub fn api<T: ToString>(msg: T) -> Self {
        Self::Api(msg.to_string())
    }

    /// Create a new custom error
    #[allow(clippy::needless_pass_by_value)]
    pub fn custom<T: ToString>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}
