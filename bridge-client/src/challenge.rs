//! Challenge period arithmetic for L2-to-L1 withdrawals
//!
//! A withdrawal becomes executable on L1 once its challenge window, measured
//! from the timestamp of the L2 block that emitted it, has fully elapsed.

use serde::{Deserialize, Serialize};

use crate::network::NetworkProfile;

/// The readiness window for a withdrawal's challenge period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeStatus {
    /// The epoch second at which the challenge period ends
    pub end_epoch_seconds: u64,
    /// The seconds remaining until the challenge period ends, zero if elapsed
    pub remaining_seconds: u64,
    /// Whether the challenge period has fully elapsed
    pub is_ready: bool,
}

/// Compute the challenge readiness window for a withdrawal emitted at the
/// given L2 block timestamp
///
/// `now` is an explicit argument so the function is deterministic; no I/O is
/// performed.
pub fn challenge_status(
    l2_block_timestamp: u64,
    now: u64,
    profile: &NetworkProfile,
) -> ChallengeStatus {
    let end_epoch_seconds = l2_block_timestamp + profile.challenge_period_seconds;
    let remaining_seconds = end_epoch_seconds.saturating_sub(now);

    ChallengeStatus { end_epoch_seconds, remaining_seconds, is_ready: remaining_seconds == 0 }
}
