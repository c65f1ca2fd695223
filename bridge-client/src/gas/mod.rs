//! Fee and gas cost estimation
//!
//! A rollup transaction pays for L2 execution and for posting its calldata to
//! the parent chain; the estimator reports both components and their exact
//! integer sum. The preferred L1 component source is the `NodeInterface`
//! precompile, with a calldata byte-counting fallback for networks where the
//! precompile is absent.

use std::{future::Future, sync::Arc, time::Duration};

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    abis::{NODE_INTERFACE_ADDRESS, NodeInterface},
    chain::{CallRequest, ChainClient, with_deadline},
    error::BridgeClientError,
    network::NetworkProfile,
};

mod submission;

pub use submission::{SubmissionCostEstimate, SubmissionCostParams, estimate_submission_cost};

// -------------
// | Constants |
// -------------

/// The default deadline applied to each chain read
const DEFAULT_READ_DEADLINE: Duration = Duration::from_secs(30);

/// The number of basis points in one unit
const BPS_PER_UNIT: u64 = 10_000;

// ---------
// | Types |
// ---------

/// A fully-resolved fee estimate for a call
///
/// All authoritative fields are exact integers; `total_fee` always equals
/// `l1_data_fee + l2_execution_fee`. Floats appear only in the display
/// percentages derived after the fact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeEstimate {
    /// The estimated gas limit for the call
    pub gas_limit: u64,
    /// The max fee per gas observed in the snapshot
    pub max_fee_per_gas: U256,
    /// The max priority fee per gas observed in the snapshot
    pub max_priority_fee_per_gas: U256,
    /// The parent chain base fee observed in the snapshot
    pub l1_base_fee: U256,
    /// The fee paid to post the call's data to the parent chain
    pub l1_data_fee: U256,
    /// The fee paid for L2 execution
    pub l2_execution_fee: U256,
    /// The total fee, exactly `l1_data_fee + l2_execution_fee`
    pub total_fee: U256,
}

impl FeeEstimate {
    /// The L1 data fee's share of the total, in basis points
    pub fn l1_share_bps(&self) -> u64 {
        component_share_bps(self.l1_data_fee, self.total_fee)
    }

    /// The L2 execution fee's share of the total, in basis points
    pub fn l2_share_bps(&self) -> u64 {
        component_share_bps(self.l2_execution_fee, self.total_fee)
    }

    /// A human-readable breakdown of the estimate
    ///
    /// Percentages are derived from the basis-point shares, so the display
    /// path introduces no floating-point drift into the authoritative fields.
    pub fn display_breakdown(&self) -> String {
        let l1_pct = self.l1_share_bps() as f64 / 100.;
        let l2_pct = self.l2_share_bps() as f64 / 100.;
        format!(
            "total {} wei (L1 data {} wei, {l1_pct:.2}% | L2 execution {} wei, {l2_pct:.2}%)",
            self.total_fee, self.l1_data_fee, self.l2_execution_fee,
        )
    }
}

/// Compute a fee component's share of the total in basis points
fn component_share_bps(component: U256, total: U256) -> u64 {
    if total.is_zero() {
        return 0;
    }

    let bps = component * U256::from(BPS_PER_UNIT) / total;
    bps.saturating_to::<u64>()
}

// ------------------------
// | Estimator Definition |
// ------------------------

/// Estimates execution fees and retryable ticket submission costs
pub struct FeeEstimator<C> {
    /// The chain client used for reads
    client: Arc<C>,
    /// The network profile for the target rollup
    profile: NetworkProfile,
    /// The deadline applied to each individual chain read
    read_deadline: Duration,
}

impl<C> Clone for FeeEstimator<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            profile: self.profile,
            read_deadline: self.read_deadline,
        }
    }
}

impl<C: ChainClient> FeeEstimator<C> {
    /// Create a new estimator over the given client and network profile
    pub fn new(client: Arc<C>, profile: NetworkProfile) -> Self {
        Self { client, profile, read_deadline: DEFAULT_READ_DEADLINE }
    }

    /// Set the per-read deadline
    pub fn with_read_deadline(mut self, deadline: Duration) -> Self {
        self.read_deadline = deadline;
        self
    }

    /// Estimate the full fee breakdown for a call
    pub async fn estimate(
        &self,
        to: Address,
        calldata: Bytes,
        value: U256,
    ) -> Result<FeeEstimate, BridgeClientError> {
        let call = CallRequest { to: Some(to), data: calldata.clone(), value };

        // The gas estimate and the fee snapshot are independent reads; the
        // snapshot is a single atomic read set so all fee fields come from
        // the same call round
        let (gas_limit, snapshot) = tokio::try_join!(
            self.read(self.client.estimate_gas(&call)),
            self.read(self.client.get_fee_data()),
        )?;

        let l1_gas_units = self.l1_gas_units(to, &calldata).await;
        let l1_data_fee = U256::from(l1_gas_units) * snapshot.l1_base_fee;
        let l2_execution_fee = U256::from(gas_limit) * snapshot.max_fee_per_gas;

        Ok(FeeEstimate {
            gas_limit,
            max_fee_per_gas: snapshot.max_fee_per_gas,
            max_priority_fee_per_gas: snapshot.max_priority_fee_per_gas,
            l1_base_fee: snapshot.l1_base_fee,
            l1_data_fee,
            l2_execution_fee,
            total_fee: l1_data_fee + l2_execution_fee,
        })
    }

    /// Size the submission cost and required deposit for a retryable ticket
    /// with the given parameters
    pub fn estimate_submission_cost(&self, params: &SubmissionCostParams) -> SubmissionCostEstimate {
        estimate_submission_cost(params, &self.profile)
    }

    /// The L1 gas units charged for posting the call's data
    ///
    /// Prefers the `NodeInterface` gas component view; any failure silently
    /// falls back to counting calldata bytes. Absence of the precompile is an
    /// expected condition, never an error.
    async fn l1_gas_units(&self, to: Address, calldata: &Bytes) -> u64 {
        match self.node_interface_l1_gas(to, calldata).await {
            Ok(gas) => gas,
            Err(err) => {
                debug!("L1 gas component view unavailable, counting calldata bytes: {err}");
                calldata_l1_gas(calldata, &self.profile)
            },
        }
    }

    /// Read the L1 gas component from the `NodeInterface` precompile
    async fn node_interface_l1_gas(
        &self,
        to: Address,
        calldata: &Bytes,
    ) -> Result<u64, BridgeClientError> {
        let call = NodeInterface::gasEstimateL1ComponentCall {
            to,
            contractCreation: false,
            data: calldata.clone(),
        };

        let ret = self
            .read(self.client.call_view(NODE_INTERFACE_ADDRESS, call.abi_encode().into()))
            .await?;

        let components = NodeInterface::gasEstimateL1ComponentCall::abi_decode_returns(&ret)
            .map_err(BridgeClientError::decode)?;
        Ok(components.gasEstimateForL1)
    }

    /// Bound a chain read with the configured deadline
    async fn read<T, F>(&self, fut: F) -> Result<T, BridgeClientError>
    where
        F: Future<Output = Result<T, BridgeClientError>>,
    {
        with_deadline(self.read_deadline, fut).await
    }
}

/// Count the L1 gas charged for the given calldata byte by byte
///
/// Zero bytes cost less than non-zero bytes, per the parent chain's calldata
/// pricing.
pub fn calldata_l1_gas(calldata: &[u8], profile: &NetworkProfile) -> u64 {
    calldata
        .iter()
        .map(|byte| {
            if *byte == 0 { profile.calldata_zero_byte_gas } else { profile.calldata_non_zero_byte_gas }
        })
        .sum()
}
