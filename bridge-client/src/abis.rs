//! ABI definitions for the rollup precompiles and bridge contracts the core
//! reads from

use alloy_primitives::{Address, FixedBytes, hex};
use alloy_sol_types::sol;

/// The address of the `ArbSys` precompile
pub const ARB_SYS_ADDRESS: Address =
    Address(FixedBytes(hex!("0000000000000000000000000000000000000064")));

/// The address of the `ArbRetryableTx` precompile
pub const ARB_RETRYABLE_TX_ADDRESS: Address =
    Address(FixedBytes(hex!("000000000000000000000000000000000000006e")));

/// The address of the `NodeInterface` precompile
pub const NODE_INTERFACE_ADDRESS: Address =
    Address(FixedBytes(hex!("00000000000000000000000000000000000000c8")));

// The ABI for the `ArbRetryableTx` precompile:
// https://docs.arbitrum.io/build-decentralized-apps/precompiles/reference
sol! {
    contract ArbRetryableTx {
        /// Emitted when a retryable ticket is created
        event TicketCreated(bytes32 indexed ticketId);

        /// Get the timestamp at which the ticket expires, or zero if the
        /// ticket has been redeemed (or never existed)
        function getTimeout(bytes32 ticketId) external view returns (uint256);
    }
}

// The ABI for the `ArbSys` precompile's L2-to-L1 message event
sol! {
    contract ArbSys {
        /// Emitted when a message is sent from L2 to L1
        event L2ToL1Tx(
            address caller,
            address indexed destination,
            uint256 indexed hash,
            uint256 indexed position,
            uint256 arbBlockNum,
            uint256 ethBlockNum,
            uint256 timestamp,
            uint256 callvalue,
            bytes data
        );
    }
}

// The ABI for the L1 outbox contract
sol! {
    contract Outbox {
        /// Whether the L2-to-L1 message at the given position has been
        /// executed on L1
        function isSpent(uint256 index) external view returns (bool);
    }
}

// The ABI for the `NodeInterface` precompile:
// https://docs.arbitrum.io/build-decentralized-apps/nodeinterface/overview
sol! {
    contract NodeInterface {
        /// Estimate the L1 portion of gas costs from the calldata size; does
        /// not simulate the transaction
        function gasEstimateL1Component(address to, bool contractCreation, bytes calldata data) external payable returns (uint64 gasEstimateForL1, uint256 baseFee, uint256 l1BaseFeeEstimate);
    }
}
