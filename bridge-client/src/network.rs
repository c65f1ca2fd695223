//! Per-network profiles for the rollups the client understands
//!
//! A profile is looked up once by chain id and never mutated at runtime; the
//! "well-known" bridge contract addresses and cost constants live here rather
//! than in a mutable global table.

use alloy_primitives::{Address, FixedBytes, hex};
use serde::{Deserialize, Serialize};

// -------------
// | Constants |
// -------------

/// The chain id of Arbitrum One
pub const ARBITRUM_ONE_CHAIN_ID: u64 = 42161;
/// The chain id of Arbitrum Nova
pub const ARBITRUM_NOVA_CHAIN_ID: u64 = 42170;
/// The chain id of Arbitrum Sepolia
pub const ARBITRUM_SEPOLIA_CHAIN_ID: u64 = 421614;

/// The challenge period on mainnet networks, seven days
const MAINNET_CHALLENGE_PERIOD_SECS: u64 = 604_800;
/// The challenge period on testnet networks, one hour
const TESTNET_CHALLENGE_PERIOD_SECS: u64 = 3600;

/// The base cost in L1 gas of posting a retryable ticket submission
const SUBMISSION_COST_BASE_GAS: u64 = 1400;
/// The per-byte cost in L1 gas of a retryable ticket's calldata
const SUBMISSION_COST_PER_BYTE_GAS: u64 = 6;
/// The L1 calldata cost of a zero byte
const CALLDATA_ZERO_BYTE_GAS: u64 = 4;
/// The L1 calldata cost of a non-zero byte
const CALLDATA_NON_ZERO_BYTE_GAS: u64 = 16;
/// The safety multiplier applied to the submission fee, in basis points
const SUBMISSION_SAFETY_MULTIPLIER_BPS: u64 = 15_000;

/// The L1 outbox contract for Arbitrum One
const ARBITRUM_ONE_OUTBOX: Address =
    Address(FixedBytes(hex!("0B9857ae2D4A3DBe74ffE1d7DF045bb7F96E4840")));
/// The L1 outbox contract for Arbitrum Nova
const ARBITRUM_NOVA_OUTBOX: Address =
    Address(FixedBytes(hex!("D4B80C3D7240325D18E645B49e6535A3Bf95cc58")));
/// The L1 outbox contract for Arbitrum Sepolia
const ARBITRUM_SEPOLIA_OUTBOX: Address =
    Address(FixedBytes(hex!("65f07C7D521164a4d5DaC6eB8Fac8DA067A3B78F")));

// ---------
// | Types |
// ---------

/// The immutable per-network parameters used for status resolution and fee
/// sizing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// The rollup's chain id
    pub chain_id: u64,
    /// The withdrawal challenge period in seconds
    pub challenge_period_seconds: u64,
    /// The L1 outbox contract recording executable L2-to-L1 messages
    pub outbox_address: Address,
    /// The base cost in L1 gas of a retryable ticket submission
    pub submission_cost_base_gas: u64,
    /// The per-byte cost in L1 gas of a retryable ticket's calldata
    pub submission_cost_per_byte_gas: u64,
    /// The L1 calldata cost of a zero byte
    pub calldata_zero_byte_gas: u64,
    /// The L1 calldata cost of a non-zero byte
    pub calldata_non_zero_byte_gas: u64,
    /// The safety multiplier applied to the submission fee, in basis points
    pub submission_safety_multiplier_bps: u64,
}

impl NetworkProfile {
    /// Look up the profile for the given chain id
    pub fn for_chain(chain_id: u64) -> Option<Self> {
        let (challenge_period_seconds, outbox_address) = match chain_id {
            ARBITRUM_ONE_CHAIN_ID => (MAINNET_CHALLENGE_PERIOD_SECS, ARBITRUM_ONE_OUTBOX),
            ARBITRUM_NOVA_CHAIN_ID => (MAINNET_CHALLENGE_PERIOD_SECS, ARBITRUM_NOVA_OUTBOX),
            ARBITRUM_SEPOLIA_CHAIN_ID => (TESTNET_CHALLENGE_PERIOD_SECS, ARBITRUM_SEPOLIA_OUTBOX),
            _ => return None,
        };

        Some(Self {
            chain_id,
            challenge_period_seconds,
            outbox_address,
            submission_cost_base_gas: SUBMISSION_COST_BASE_GAS,
            submission_cost_per_byte_gas: SUBMISSION_COST_PER_BYTE_GAS,
            calldata_zero_byte_gas: CALLDATA_ZERO_BYTE_GAS,
            calldata_non_zero_byte_gas: CALLDATA_NON_ZERO_BYTE_GAS,
            submission_safety_multiplier_bps: SUBMISSION_SAFETY_MULTIPLIER_BPS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_profiles() {
        let one = NetworkProfile::for_chain(ARBITRUM_ONE_CHAIN_ID).unwrap();
        assert_eq!(one.challenge_period_seconds, MAINNET_CHALLENGE_PERIOD_SECS);
        assert_eq!(one.submission_cost_base_gas, 1400);
        assert_eq!(one.submission_cost_per_byte_gas, 6);
        assert_eq!(one.submission_safety_multiplier_bps, 15_000);

        let sepolia = NetworkProfile::for_chain(ARBITRUM_SEPOLIA_CHAIN_ID).unwrap();
        assert_eq!(sepolia.challenge_period_seconds, TESTNET_CHALLENGE_PERIOD_SECS);

        assert!(NetworkProfile::for_chain(1).is_none());
    }
}
