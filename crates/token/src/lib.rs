//! Client for the token contract.
//!
//! [`TokenClient`] reads token state and submits transfers, approvals, burns and
//! batch transfers on behalf of a connected [`wallet::WalletSession`]. Amounts
//! are always in the token's smallest unit.

pub mod batch;
pub mod client;
pub mod error;
pub mod submission;

pub use batch::{parse_address, parse_amount, BatchTransferJob, TransferRequest};
pub use client::{MetadataReads, TokenClient, TokenMetadata};
pub use error::TokenError;
pub use submission::{Sequential, SubmissionPolicy};
pub use wallet::Receipt;

#[cfg(test)]
pub(crate) mod test_utils;
