//! Retryable ticket submission cost and deposit sizing
//!
//! Pure integer arithmetic over the network profile's cost constants; no
//! chain reads are issued here.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::network::NetworkProfile;

/// The number of basis points in one unit
const BPS_PER_UNIT: u64 = 10_000;

/// The inputs to submission cost sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionCostParams {
    /// The length in bytes of the ticket's calldata
    pub data_length_bytes: usize,
    /// The parent chain base fee to price the submission at
    pub l1_base_fee: U256,
    /// The value the ticket carries to its L2 callee
    pub l2_call_value: U256,
    /// The gas limit for the ticket's L2 execution
    pub gas_limit: u64,
    /// The max fee per gas for the ticket's L2 execution
    pub max_fee_per_gas: U256,
}

/// A sized retryable ticket submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionCostEstimate {
    /// The length in bytes of the ticket's calldata
    pub data_length_bytes: usize,
    /// The L1 gas charged for the submission
    pub submission_gas: u64,
    /// The submission fee at the given base fee
    pub submission_fee: U256,
    /// The submission fee with the safety multiplier applied
    pub max_submission_cost: U256,
    /// The total deposit the submitting transaction must carry: the L2 call
    /// value, the max submission cost, and the full L2 execution fee
    pub required_deposit: U256,
}

/// Size the submission cost and required deposit for a retryable ticket
pub fn estimate_submission_cost(
    params: &SubmissionCostParams,
    profile: &NetworkProfile,
) -> SubmissionCostEstimate {
    let submission_gas = profile.submission_cost_base_gas
        + params.data_length_bytes as u64 * profile.submission_cost_per_byte_gas;
    let submission_fee = U256::from(submission_gas) * params.l1_base_fee;
    let max_submission_cost = submission_fee * U256::from(profile.submission_safety_multiplier_bps)
        / U256::from(BPS_PER_UNIT);

    let execution_fee = U256::from(params.gas_limit) * params.max_fee_per_gas;
    let required_deposit = params.l2_call_value + max_submission_cost + execution_fee;

    SubmissionCostEstimate {
        data_length_bytes: params.data_length_bytes,
        submission_gas,
        submission_fee,
        max_submission_cost,
        required_deposit,
    }
}
