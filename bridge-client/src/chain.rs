//! The read-only chain client contract consumed by the core
//!
//! Implementations (JSON-RPC, test mocks) live outside this crate; the core
//! only requires the handful of read and estimate operations below. No
//! component in this crate issues a state-changing transaction.

use std::{future::Future, time::Duration};

use alloy_primitives::{Address, B256, Bytes, LogData, U256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BridgeClientError;

/// A readable type alias for a transaction hash
pub type TxHash = B256;

// ---------
// | Types |
// ---------

/// A mined transaction receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionReceipt {
    /// The hash of the transaction
    pub transaction_hash: TxHash,
    /// The number of the block the transaction was included in
    pub block_number: u64,
    /// Whether the transaction succeeded
    pub status: bool,
    /// The logs emitted by the transaction, in emission order
    pub logs: Vec<Log>,
}

/// A log emitted by a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Log {
    /// The address of the emitting contract
    pub address: Address,
    /// The log's topics, with the event signature hash first
    pub topics: Vec<B256>,
    /// The log's unindexed data
    pub data: Bytes,
}

impl Log {
    /// The event signature hash (topic zero), if the log has any topics
    pub fn topic0(&self) -> Option<B256> {
        self.topics.first().copied()
    }

    /// Convert to an `alloy` primitive log for `sol!` event decoding
    pub fn to_primitive(&self) -> alloy_primitives::Log {
        alloy_primitives::Log {
            address: self.address,
            data: LogData::new_unchecked(self.topics.clone(), self.data.clone()),
        }
    }
}

/// A block header summary
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Block {
    /// The block number
    pub number: u64,
    /// The block timestamp in epoch seconds
    pub timestamp: u64,
}

/// A filter for fetching logs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogFilter {
    /// The emitting contract to filter on
    pub address: Option<Address>,
    /// The topics to filter on, positionally; `None` matches any
    pub topics: Vec<Option<B256>>,
    /// The first block to search, inclusive
    pub from_block: Option<u64>,
    /// The last block to search, inclusive
    pub to_block: Option<u64>,
}

/// The call described to `estimate_gas`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallRequest {
    /// The call target; `None` for contract creation
    pub to: Option<Address>,
    /// The calldata
    pub data: Bytes,
    /// The value sent with the call
    pub value: U256,
}

/// The fee fields observed in a single call round
///
/// All fields must come from the same read so a fee estimate is never built
/// from values observed at different block heights.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GasPriceSnapshot {
    /// The legacy gas price
    pub gas_price: U256,
    /// The EIP-1559 max fee per gas
    pub max_fee_per_gas: U256,
    /// The EIP-1559 max priority fee per gas
    pub max_priority_fee_per_gas: U256,
    /// The parent chain's base fee, as estimated by the rollup
    pub l1_base_fee: U256,
}

// ----------------------
// | Client Definition |
// ----------------------

/// The read-only operations the core issues against the rollup and its
/// parent chain
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Fetch the receipt for a transaction, if it has been mined
    async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, BridgeClientError>;

    /// Fetch a block header by number, if the block exists
    async fn get_block(&self, number: u64) -> Result<Option<Block>, BridgeClientError>;

    /// Fetch logs matching the given filter
    async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<Log>, BridgeClientError>;

    /// Issue an `eth_call`-style view read and return the raw return data
    async fn call_view(&self, to: Address, data: Bytes) -> Result<Bytes, BridgeClientError>;

    /// Estimate the gas limit for the given call
    async fn estimate_gas(&self, call: &CallRequest) -> Result<u64, BridgeClientError>;

    /// Fetch the current fee fields as one atomic read set
    async fn get_fee_data(&self) -> Result<GasPriceSnapshot, BridgeClientError>;
}

// -----------
// | Helpers |
// -----------

/// The error message emitted when a chain read exceeds its deadline
const ERR_READ_DEADLINE_EXCEEDED: &str = "chain read exceeded deadline";

/// Bound a chain read with the caller's configured deadline
///
/// Expiry maps to a `Timeout` error, never to a domain status: an RPC that
/// didn't answer must not be conflated with "not yet created".
pub(crate) async fn with_deadline<T, F>(
    deadline: Duration,
    fut: F,
) -> Result<T, BridgeClientError>
where
    F: Future<Output = Result<T, BridgeClientError>>,
{
    tokio::time::timeout(deadline, fut)
        .await
        .map_err(|_| BridgeClientError::timeout(ERR_READ_DEADLINE_EXCEEDED))?
}
