//! Error types for the bridge client

use thiserror::Error;

/// Error type for bridge client operations
///
/// Expected polling outcomes (missing receipts, unredeemed tickets, open
/// challenge windows) are encoded in the returned status enums, not here;
/// these variants all indicate that a read did not complete and no status
/// can be trusted.
#[derive(Debug, Error, Clone)]
pub enum BridgeClientError {
    /// An error issuing a JSON-RPC read
    #[error("RPC error: {0}")]
    Rpc(String),

    /// A read exceeded the configured deadline
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// An error ABI-decoding a log or view-call return
    #[error("Decode error: {0}")]
    Decode(String),

    /// An error parsing a value
    #[error("Parsing error: {0}")]
    Parse(String),

    /// A miscellaneous error
    #[error("Custom error: {0}")]
    Custom(String),
}

impl BridgeClientError {
    /// Create a new RPC error
    #[allow(clippy::needless_pass_by_value)]
    pub fn rpc<T: ToString>(msg: T) -> Self {
        Self::Rpc(msg.to_string())
    }

    /// Create a new timeout error
    #[allow(clippy::needless_pass_by_value)]
    pub fn timeout<T: ToString>(msg: T) -> Self {
        Self::Timeout(msg.to_string())
    }

    /// Create a new decode error
    #[allow(clippy::needless_pass_by_value)]
    pub fn decode<T: ToString>(msg: T) -> Self {
        Self::Decode(msg.to_string())
    }

    /// Create a new parsing error
    #[allow(clippy::needless_pass_by_value)]
    pub fn parse<T: ToString>(msg: T) -> Self {
        Self::Parse(msg.to_string())
    }

    /// Create a new custom error
    #[allow(clippy::needless_pass_by_value)]
    pub fn custom<T: ToString>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}
