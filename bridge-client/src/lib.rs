//! Cross-layer message tracking and fee estimation for Arbitrum-style
//! optimistic rollups
//!
//! The crate derives lifecycle statuses for L1-to-L2 retryable tickets and
//! L2-to-L1 withdrawals (including challenge-period arithmetic) and computes
//! exact integer fee breakdowns for rollup calls, over a caller-provided
//! read-only [`chain::ChainClient`]. It never submits transactions, never
//! retries, and holds no state between calls: pollers drive it.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![deny(unsafe_code)]
#![deny(clippy::needless_pass_by_ref_mut)]
#![deny(clippy::unused_async)]

pub mod abis;
pub mod chain;
pub mod challenge;
pub mod error;
pub mod gas;
pub mod message_status;
pub mod network;

#[cfg(test)]
pub(crate) mod mock;
