//! A rate-limited client for block explorer REST APIs
//!
//! Every request passes through a shared FIFO dispatcher that paces call
//! starts to the configured requests-per-second ceiling, so concurrent
//! callers never trip the explorer's quota. Responses use the common
//! `{status, message, result}` envelope; an empty result set is a valid
//! outcome, not an error.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![deny(unsafe_code)]
#![deny(clippy::needless_pass_by_ref_mut)]

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::warn;

pub mod error;
pub mod rate_limiter;

use error::ExplorerClientError;
use rate_limiter::RateLimiter;

// -------------
// | Constants |
// -------------

/// Default timeout for requests to the explorer
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// The envelope status value indicating success
const SUCCESS_STATUS: &str = "1";

/// The envelope message signaling a valid empty result set
const NO_TRANSACTIONS_FOUND: &str = "No transactions found";

/// The explorer module for account operations
const ACCOUNT_MODULE: &str = "account";
/// The explorer action listing an account's transactions
const TX_LIST_ACTION: &str = "txlist";
/// The explorer action listing an account's token transfers
const TOKEN_TX_ACTION: &str = "tokentx";

// ---------
// | Types |
// ---------

/// The configuration options for the explorer client
#[derive(Debug, Clone)]
pub struct ExplorerClientConfig {
    /// The base URL of the explorer API
    pub base_url: String,
    /// The API key sent with every request
    pub api_key: String,
    /// The request ceiling in calls per second
    pub calls_per_second: u64,
}

/// The explorer's response envelope
#[derive(Debug, Clone, Deserialize)]
struct ExplorerEnvelope<T> {
    /// `"1"` on success, `"0"` on failure
    status: String,
    /// A human-readable status message
    message: String,
    /// The operation-specific payload
    result: Option<T>,
}

/// A transaction row returned by the explorer's account listings
///
/// The explorer serializes all numeric fields as decimal strings.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplorerTransaction {
    /// The transaction hash
    pub hash: String,
    /// The block number the transaction was included in
    #[serde(rename = "blockNumber")]
    pub block_number: String,
    /// The block timestamp in epoch seconds
    #[serde(rename = "timeStamp")]
    pub time_stamp: String,
    /// The sending address
    pub from: String,
    /// The receiving address
    pub to: String,
    /// The value transferred, in wei
    pub value: String,
}

// ---------------------
// | Client Definition |
// ---------------------

/// A client for an etherscan-style explorer REST API, pacing all requests
/// through a shared rate limiter
#[derive(Clone)]
pub struct ExplorerClient {
    /// The base URL of the explorer API
    base_url: String,
    /// The API key sent with every request
    api_key: String,
    /// The shared HTTP client used for issuing requests
    http_client: Client,
    /// The dispatcher pacing outbound requests
    rate_limiter: RateLimiter,
}

impl ExplorerClient {
    /// Create a new client from the given configuration
    pub fn new(config: ExplorerClientConfig) -> Result<Self, ExplorerClientError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ExplorerClientError::http)?;

        Ok(Self {
            base_url: config.base_url,
            api_key: config.api_key,
            http_client,
            rate_limiter: RateLimiter::new(config.calls_per_second),
        })
    }

    /// Issue a parameterized explorer query and unwrap its envelope
    ///
    /// Returns `None` for a valid empty result set; envelope failures other
    /// than "no transactions found" surface as API errors carrying the
    /// explorer's message.
    pub async fn query<T: DeserializeOwned>(
        &self,
        module: &str,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<Option<T>, ExplorerClientError> {
        self.rate_limiter.acquire().await;

        let url = self.build_url(module, action, params)?;
        let envelope = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(ExplorerClientError::http)?
            .json::<ExplorerEnvelope<T>>()
            .await
            .map_err(ExplorerClientError::parse)?;

        unwrap_envelope(envelope)
    }

    /// List the transactions sent to or from the given address
    pub async fn get_transactions(
        &self,
        address: &str,
    ) -> Result<Vec<ExplorerTransaction>, ExplorerClientError> {
        let params = [("address", address), ("sort", "asc")];
        let result = self.query(ACCOUNT_MODULE, TX_LIST_ACTION, &params).await?;
        Ok(result.unwrap_or_default())
    }

    /// List the token transfers involving the given address
    pub async fn get_token_transfers(
        &self,
        address: &str,
    ) -> Result<Vec<ExplorerTransaction>, ExplorerClientError> {
        let params = [("address", address), ("sort", "asc")];
        let result = self.query(ACCOUNT_MODULE, TOKEN_TX_ACTION, &params).await?;
        Ok(result.unwrap_or_default())
    }

    /// Get a full URL for the given module, action, and parameters
    fn build_url(
        &self,
        module: &str,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<Url, ExplorerClientError> {
        let base_params =
            [("module", module), ("action", action), ("apikey", self.api_key.as_str())];
        let all_params = base_params.iter().chain(params.iter());

        Url::parse_with_params(&self.base_url, all_params).map_err(ExplorerClientError::parse)
    }
}

// -----------
// | Helpers |
// -----------

/// Unwrap an explorer envelope into its payload
///
/// An empty result set ("no transactions found") is a valid outcome; any
/// other failure status carries the explorer's message.
fn unwrap_envelope<T>(envelope: ExplorerEnvelope<T>) -> Result<Option<T>, ExplorerClientError> {
    if envelope.status == SUCCESS_STATUS {
        return Ok(envelope.result);
    }

    if envelope.message == NO_TRANSACTIONS_FOUND {
        return Ok(None);
    }

    warn!("explorer API returned an error: {}", envelope.message);
    Err(ExplorerClientError::api(envelope.message))
}
