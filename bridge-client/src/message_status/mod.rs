//! Cross-layer message status resolution
//!
//! Derives the lifecycle status of L1-to-L2 retryable tickets and L2-to-L1
//! withdrawals from raw chain reads. Resolution is a pure function of current
//! chain state: nothing here blocks waiting for a future state change, and
//! scheduling/backoff belongs to the polling caller.

use std::{future::Future, sync::Arc, time::Duration};

use alloy_primitives::{Address, B256, U256};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    chain::{ChainClient, TxHash, with_deadline},
    error::BridgeClientError,
    network::NetworkProfile,
};

mod l1_to_l2;
mod l2_to_l1;

// -------------
// | Constants |
// -------------

/// The default deadline applied to each chain read
const DEFAULT_READ_DEADLINE: Duration = Duration::from_secs(30);

// ---------
// | Types |
// ---------

/// The lifecycle status of an L1-to-L2 retryable ticket
///
/// Pollers should treat `NotYetCreated` as "poll again", `CreationFailed` and
/// `Expired` as terminal failures, and `Redeemed` as terminal success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RetryableTicketStatus {
    /// No L1 receipt exists yet for the submitting transaction
    NotYetCreated,
    /// The L1 transaction was mined but created no ticket
    CreationFailed,
    /// The ticket exists on L2 and awaits redemption
    FundsDepositedOnL2,
    /// The ticket was redeemed on L2
    ///
    /// A zero on-chain timeout is indistinguishable from a ticket id that
    /// never existed when queried cold; this resolver always reports
    /// `Redeemed`, and callers holding independent proof of creation may
    /// override that interpretation.
    Redeemed,
    /// The ticket's lifetime elapsed without redemption
    Expired,
}

impl RetryableTicketStatus {
    /// Whether the status is terminal, i.e. no further polling will change it
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::CreationFailed | Self::Redeemed | Self::Expired)
    }
}

/// An L1-to-L2 retryable ticket and its resolved status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryableTicket {
    /// The ticket id; zero when no creation event was found
    pub ticket_id: B256,
    /// The epoch second at which the ticket expires; zero once redeemed
    pub timeout_epoch_seconds: u64,
    /// The resolved lifecycle status
    pub status: RetryableTicketStatus,
}

impl RetryableTicket {
    /// A placeholder ticket for a submission with no mined L1 receipt
    fn not_yet_created() -> Self {
        Self {
            ticket_id: B256::ZERO,
            timeout_epoch_seconds: 0,
            status: RetryableTicketStatus::NotYetCreated,
        }
    }

    /// A placeholder ticket for a mined L1 receipt with no creation events
    fn creation_failed() -> Self {
        Self {
            ticket_id: B256::ZERO,
            timeout_epoch_seconds: 0,
            status: RetryableTicketStatus::CreationFailed,
        }
    }
}

/// The lifecycle status of an L2-to-L1 withdrawal
///
/// Ordered: the status observed for a withdrawal over increasing time is
/// non-decreasing in `Unconfirmed < Confirmed < Executed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WithdrawalStatus {
    /// The withdrawal is unmined, unindexed, or inside its challenge window
    Unconfirmed,
    /// The challenge window has elapsed; the withdrawal is executable on L1
    Confirmed,
    /// The withdrawal has been executed on L1
    Executed,
}

/// An L2-to-L1 withdrawal message and its resolved status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalMessage {
    /// The hash of the L2 transaction that sent the message
    pub l2_tx_hash: TxHash,
    /// The message's position in the outbox; `None` when no message event has
    /// been observed yet
    pub position: Option<U256>,
    /// The L1 destination address, if observed
    pub destination: Option<Address>,
    /// The value carried by the message
    pub amount: U256,
    /// The resolved lifecycle status
    pub status: WithdrawalStatus,
    /// The epoch second at which the challenge period ends; zero when the
    /// emitting block is unknown
    pub challenge_end_epoch_seconds: u64,
}

impl WithdrawalMessage {
    /// A placeholder message for a transaction with no observed withdrawal
    fn unconfirmed(l2_tx_hash: TxHash) -> Self {
        Self {
            l2_tx_hash,
            position: None,
            destination: None,
            amount: U256::ZERO,
            status: WithdrawalStatus::Unconfirmed,
            challenge_end_epoch_seconds: 0,
        }
    }
}

// -----------------------
// | Resolver Definition |
// -----------------------

/// Resolves cross-layer message statuses from raw chain reads
pub struct MessageStatusResolver<C> {
    /// The chain client used for reads
    client: Arc<C>,
    /// The network profile for the target rollup
    profile: NetworkProfile,
    /// The deadline applied to each individual chain read
    read_deadline: Duration,
}

impl<C> Clone for MessageStatusResolver<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            profile: self.profile,
            read_deadline: self.read_deadline,
        }
    }
}

impl<C: ChainClient> MessageStatusResolver<C> {
    /// Create a new resolver over the given client and network profile
    pub fn new(client: Arc<C>, profile: NetworkProfile) -> Self {
        Self { client, profile, read_deadline: DEFAULT_READ_DEADLINE }
    }

    /// Set the per-read deadline
    pub fn with_read_deadline(mut self, deadline: Duration) -> Self {
        self.read_deadline = deadline;
        self
    }

    /// Get a reference to the chain client
    pub(crate) fn client(&self) -> &C {
        &self.client
    }

    /// Get the resolver's network profile
    pub(crate) fn profile(&self) -> &NetworkProfile {
        &self.profile
    }

    /// Bound a chain read with the configured deadline
    pub(crate) async fn read<T, F>(&self, fut: F) -> Result<T, BridgeClientError>
    where
        F: Future<Output = Result<T, BridgeClientError>>,
    {
        with_deadline(self.read_deadline, fut).await
    }
}

// -----------
// | Helpers |
// -----------

/// The current time in epoch seconds
pub(crate) fn now_epoch_seconds() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bytes, U256};
    use alloy_sol_types::{SolCall, SolValue};

    use crate::{
        abis::{ARB_RETRYABLE_TX_ADDRESS, ArbRetryableTx, ArbSys, Outbox},
        chain::{Block, TransactionReceipt},
        mock::{MockChainClient, log_from_event},
        network::{ARBITRUM_ONE_CHAIN_ID, NetworkProfile},
    };

    use super::*;

    /// The challenge period of the profile used below, seven days
    const CHALLENGE_PERIOD: u64 = 604_800;

    /// The profile used in the tests below
    fn profile() -> NetworkProfile {
        NetworkProfile::for_chain(ARBITRUM_ONE_CHAIN_ID).unwrap()
    }

    /// Build a resolver over the given mock
    fn resolver(mock: MockChainClient) -> MessageStatusResolver<MockChainClient> {
        MessageStatusResolver::new(Arc::new(mock), profile())
    }

    /// Build a successful receipt holding the given logs
    fn receipt(tx_hash: TxHash, block_number: u64, logs: Vec<crate::chain::Log>) -> TransactionReceipt {
        TransactionReceipt { transaction_hash: tx_hash, block_number, status: true, logs }
    }

    /// Register a `getTimeout` response for the given ticket id
    fn register_timeout(mock: &mut MockChainClient, ticket_id: B256, timeout: u64) {
        let calldata = ArbRetryableTx::getTimeoutCall { ticketId: ticket_id }.abi_encode();
        mock.register_view(
            ARB_RETRYABLE_TX_ADDRESS,
            calldata.into(),
            U256::from(timeout).abi_encode().into(),
        );
    }

    /// Register an outbox `isSpent` response for the given position
    fn register_spent(mock: &mut MockChainClient, position: U256, spent: bool) {
        let calldata = Outbox::isSpentCall { index: position }.abi_encode();
        mock.register_view(profile().outbox_address, calldata.into(), spent.abi_encode().into());
    }

    /// Build an `L2ToL1Tx` log for the given position and call value
    fn withdrawal_log(position: U256, amount: U256) -> crate::chain::Log {
        let event = ArbSys::L2ToL1Tx {
            caller: Address::repeat_byte(1),
            destination: Address::repeat_byte(2),
            hash: U256::ZERO,
            position,
            arbBlockNum: U256::ZERO,
            ethBlockNum: U256::ZERO,
            timestamp: U256::ZERO,
            callvalue: amount,
            data: Bytes::new(),
        };
        log_from_event(crate::abis::ARB_SYS_ADDRESS, &event)
    }

    #[tokio::test]
    async fn test_missing_l1_receipt_is_not_yet_created() {
        let resolver = resolver(MockChainClient::default());
        let tickets = resolver.resolve_l1_to_l2_status(B256::repeat_byte(9)).await.unwrap();

        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].status, RetryableTicketStatus::NotYetCreated);
        assert!(!tickets[0].status.is_terminal());
    }

    #[tokio::test]
    async fn test_receipt_without_creation_events_is_creation_failed() {
        let tx_hash = B256::repeat_byte(9);
        let mut mock = MockChainClient::default();
        mock.receipts.insert(tx_hash, receipt(tx_hash, 100, Vec::new()));

        let tickets = resolver(mock).resolve_l1_to_l2_status(tx_hash).await.unwrap();
        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].status, RetryableTicketStatus::CreationFailed);
        assert!(tickets[0].status.is_terminal());
    }

    #[tokio::test]
    async fn test_batch_created_tickets_preserve_log_order() {
        let tx_hash = B256::repeat_byte(9);
        let redeemed_id = B256::repeat_byte(1);
        let live_id = B256::repeat_byte(2);

        let logs = [redeemed_id, live_id]
            .into_iter()
            .map(|id| {
                log_from_event(
                    ARB_RETRYABLE_TX_ADDRESS,
                    &ArbRetryableTx::TicketCreated { ticketId: id },
                )
            })
            .collect();

        let mut mock = MockChainClient::default();
        mock.receipts.insert(tx_hash, receipt(tx_hash, 100, logs));
        register_timeout(&mut mock, redeemed_id, 0);
        register_timeout(&mut mock, live_id, now_epoch_seconds() + 1000);

        let tickets = resolver(mock).resolve_l1_to_l2_status(tx_hash).await.unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].ticket_id, redeemed_id);
        assert_eq!(tickets[0].status, RetryableTicketStatus::Redeemed);
        assert_eq!(tickets[1].ticket_id, live_id);
        assert_eq!(tickets[1].status, RetryableTicketStatus::FundsDepositedOnL2);
    }

    #[tokio::test]
    async fn test_missing_l2_receipt_is_unconfirmed() {
        let resolver = resolver(MockChainClient::default());
        let messages = resolver.resolve_l2_to_l1_status(B256::repeat_byte(9)).await.unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].status, WithdrawalStatus::Unconfirmed);
        assert!(messages[0].position.is_none());
    }

    #[tokio::test]
    async fn test_spent_withdrawal_is_executed_inside_open_window() {
        let tx_hash = B256::repeat_byte(9);
        let position = U256::from(7u64);

        let mut mock = MockChainClient::default();
        mock.receipts
            .insert(tx_hash, receipt(tx_hash, 100, vec![withdrawal_log(position, U256::from(1000u64))]));
        // The emitting block is recent, so the challenge window is still open
        mock.blocks.insert(100, Block { number: 100, timestamp: now_epoch_seconds() });
        register_spent(&mut mock, position, true);

        let messages = resolver(mock).resolve_l2_to_l1_status(tx_hash).await.unwrap();
        assert_eq!(messages.len(), 1);
        // The spent check takes priority over the time-based check
        assert_eq!(messages[0].status, WithdrawalStatus::Executed);
        assert_eq!(messages[0].position, Some(position));
        assert_eq!(messages[0].amount, U256::from(1000u64));
    }

    #[tokio::test]
    async fn test_unspent_withdrawal_window_elapsed_is_confirmed() {
        let tx_hash = B256::repeat_byte(9);
        let position = U256::from(7u64);
        let emitted_at = now_epoch_seconds() - CHALLENGE_PERIOD - 10;

        let mut mock = MockChainClient::default();
        mock.receipts
            .insert(tx_hash, receipt(tx_hash, 100, vec![withdrawal_log(position, U256::ZERO)]));
        mock.blocks.insert(100, Block { number: 100, timestamp: emitted_at });
        register_spent(&mut mock, position, false);

        let messages = resolver(mock).resolve_l2_to_l1_status(tx_hash).await.unwrap();
        assert_eq!(messages[0].status, WithdrawalStatus::Confirmed);
        assert_eq!(messages[0].challenge_end_epoch_seconds, emitted_at + CHALLENGE_PERIOD);
    }

    #[tokio::test]
    async fn test_unspent_withdrawal_window_open_is_unconfirmed() {
        let tx_hash = B256::repeat_byte(9);
        let position = U256::from(7u64);

        let mut mock = MockChainClient::default();
        mock.receipts
            .insert(tx_hash, receipt(tx_hash, 100, vec![withdrawal_log(position, U256::ZERO)]));
        mock.blocks.insert(100, Block { number: 100, timestamp: now_epoch_seconds() });
        register_spent(&mut mock, position, false);

        let messages = resolver(mock).resolve_l2_to_l1_status(tx_hash).await.unwrap();
        assert_eq!(messages[0].status, WithdrawalStatus::Unconfirmed);
    }

    #[test]
    fn test_withdrawal_status_ordering() {
        // The statuses a withdrawal moves through are strictly increasing
        assert!(WithdrawalStatus::Unconfirmed < WithdrawalStatus::Confirmed);
        assert!(WithdrawalStatus::Confirmed < WithdrawalStatus::Executed);
    }
}
