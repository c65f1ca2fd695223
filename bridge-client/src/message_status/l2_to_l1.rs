//! L2-to-L1 withdrawal status resolution

use alloy_primitives::{Address, U256};
use alloy_sol_types::{SolCall, SolEvent};
use futures::future::try_join_all;
use tracing::info;

use crate::{
    abis::{ArbSys, Outbox},
    chain::{ChainClient, Log, TxHash},
    challenge::challenge_status,
    error::BridgeClientError,
};

use super::{MessageStatusResolver, WithdrawalMessage, WithdrawalStatus, now_epoch_seconds};

/// A withdrawal extracted from an L2 receipt's message events
struct ParsedWithdrawal {
    /// The message's position in the outbox
    position: U256,
    /// The L1 destination address
    destination: Address,
    /// The value carried by the message
    amount: U256,
}

impl<C: ChainClient> MessageStatusResolver<C> {
    /// Resolve the status of the withdrawals sent by the given L2 transaction
    ///
    /// The returned list preserves log order. A missing receipt, or a present
    /// receipt with no message events (not yet indexed), yields a single
    /// `Unconfirmed` result with no position rather than an error, so pollers
    /// can loop without exception handling.
    pub async fn resolve_l2_to_l1_status(
        &self,
        l2_tx_hash: TxHash,
    ) -> Result<Vec<WithdrawalMessage>, BridgeClientError> {
        let receipt = self.read(self.client().get_transaction_receipt(l2_tx_hash)).await?;
        let Some(receipt) = receipt else {
            return Ok(vec![WithdrawalMessage::unconfirmed(l2_tx_hash)]);
        };

        let withdrawals = extract_withdrawals(&receipt.logs);
        if withdrawals.is_empty() {
            info!("no L2-to-L1 message events in receipt for {l2_tx_hash}");
            return Ok(vec![WithdrawalMessage::unconfirmed(l2_tx_hash)]);
        }

        // The emitting block's timestamp anchors the challenge window; a
        // receipt whose block is not yet readable is treated as not yet
        // indexed, the same expected polling outcome as a missing receipt
        let block = self.read(self.client().get_block(receipt.block_number)).await?;
        let Some(block) = block else {
            return Ok(vec![WithdrawalMessage::unconfirmed(l2_tx_hash)]);
        };

        // The per-withdrawal outbox reads are independent of one another
        let spent_flags =
            try_join_all(withdrawals.iter().map(|w| self.read_outbox_spent(w.position))).await?;

        // All withdrawals in the receipt share the emitting block's window
        let now = now_epoch_seconds();
        let window = challenge_status(block.timestamp, now, self.profile());

        let messages = withdrawals
            .into_iter()
            .zip(spent_flags)
            .map(|(withdrawal, spent)| {
                // A spent outbox entry is terminal and takes priority over
                // the time-based check
                let status = if spent {
                    WithdrawalStatus::Executed
                } else if window.is_ready {
                    WithdrawalStatus::Confirmed
                } else {
                    WithdrawalStatus::Unconfirmed
                };

                WithdrawalMessage {
                    l2_tx_hash,
                    position: Some(withdrawal.position),
                    destination: Some(withdrawal.destination),
                    amount: withdrawal.amount,
                    status,
                    challenge_end_epoch_seconds: window.end_epoch_seconds,
                }
            })
            .collect();

        Ok(messages)
    }

    /// Read whether the outbox entry at the given position has been executed
    async fn read_outbox_spent(&self, position: U256) -> Result<bool, BridgeClientError> {
        let calldata = Outbox::isSpentCall { index: position }.abi_encode();
        let ret = self
            .read(self.client().call_view(self.profile().outbox_address, calldata.into()))
            .await?;

        Outbox::isSpentCall::abi_decode_returns(&ret).map_err(BridgeClientError::decode)
    }
}

/// Extract the withdrawals from a receipt's L2-to-L1 message events, in log
/// order
fn extract_withdrawals(logs: &[Log]) -> Vec<ParsedWithdrawal> {
    logs.iter()
        .filter_map(|log| ArbSys::L2ToL1Tx::decode_log(&log.to_primitive()).ok())
        .map(|event| ParsedWithdrawal {
            position: event.position,
            destination: event.destination,
            amount: event.callvalue,
        })
        .collect()
}
