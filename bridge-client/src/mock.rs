//! A canned-response chain client for tests

use std::collections::HashMap;

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolEvent;
use async_trait::async_trait;

use crate::{
    chain::{
        Block, CallRequest, ChainClient, GasPriceSnapshot, Log, LogFilter, TransactionReceipt,
        TxHash,
    },
    error::BridgeClientError,
};

/// The error message emitted when a mock has no response registered
const ERR_NO_RESPONSE: &str = "no mock response registered";

/// A `ChainClient` returning canned responses
#[derive(Default)]
pub(crate) struct MockChainClient {
    /// The receipts returned by transaction hash
    pub receipts: HashMap<TxHash, TransactionReceipt>,
    /// The blocks returned by number
    pub blocks: HashMap<u64, Block>,
    /// The view-call returns keyed by target address and calldata
    pub views: HashMap<(Address, Bytes), Bytes>,
    /// The gas estimate returned for every call
    pub gas_estimate: u64,
    /// The fee snapshot returned, if configured
    pub fee_data: Option<GasPriceSnapshot>,
}

impl MockChainClient {
    /// Register a view-call return for the given target and calldata
    pub fn register_view(&mut self, to: Address, calldata: Bytes, ret: Bytes) {
        self.views.insert((to, calldata), ret);
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TransactionReceipt>, BridgeClientError> {
        Ok(self.receipts.get(&tx_hash).cloned())
    }

    async fn get_block(&self, number: u64) -> Result<Option<Block>, BridgeClientError> {
        Ok(self.blocks.get(&number).copied())
    }

    async fn get_logs(&self, _filter: &LogFilter) -> Result<Vec<Log>, BridgeClientError> {
        Ok(Vec::new())
    }

    async fn call_view(&self, to: Address, data: Bytes) -> Result<Bytes, BridgeClientError> {
        self.views
            .get(&(to, data))
            .cloned()
            .ok_or_else(|| BridgeClientError::rpc(ERR_NO_RESPONSE))
    }

    async fn estimate_gas(&self, _call: &CallRequest) -> Result<u64, BridgeClientError> {
        Ok(self.gas_estimate)
    }

    async fn get_fee_data(&self) -> Result<GasPriceSnapshot, BridgeClientError> {
        self.fee_data.ok_or_else(|| BridgeClientError::rpc(ERR_NO_RESPONSE))
    }
}

/// Build a domain log from a `sol!` event instance
pub(crate) fn log_from_event<E: SolEvent>(address: Address, event: &E) -> Log {
    let data = event.encode_log_data();
    Log { address, topics: data.topics().to_vec(), data: data.data }
}
