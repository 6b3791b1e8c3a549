use alloy_primitives::TxHash;
use thiserror::Error;
use wallet::{Receipt, WalletError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// A read-only contract call failed or returned undecodable data
    #[error("Read call {method} failed: {reason}")]
    ReadCallFailed { method: &'static str, reason: String },

    /// The user declined to sign
    #[error("Transaction rejected: {0}")]
    TransactionRejected(String),

    /// The contract rejected the transaction
    #[error("Transaction reverted: {reason}")]
    TransactionReverted {
        /// Set when the reverted transaction was included on chain
        tx_hash: Option<TxHash>,
        reason: String,
    },

    /// Recipient and amount lists differ in length; nothing was submitted
    #[error("Batch has {recipients} recipients but {amounts} amounts")]
    MismatchedBatchLengths { recipients: usize, amounts: usize },

    /// A batch entry failed; earlier entries stay confirmed
    #[error(
        "Batch transfer failed at index {index} after {} confirmed transfers: {source}",
        .completed.len()
    )]
    BatchTransferPartiallyFailed {
        /// Position of the failing request
        index: usize,
        /// Receipts of requests `0..index`
        completed: Vec<Receipt>,
        source: Box<TokenError>,
    },

    #[error("Invalid address: {0:?}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    /// The configured burn amount does not fit in 256 bits
    #[error("Burn amount overflows at {decimals} decimals")]
    BurnAmountOverflow { decimals: u8 },

    /// The wallet session has no active account
    #[error("No active account")]
    NoActiveAccount,

    #[error(transparent)]
    Wallet(WalletError),
}

impl From<WalletError> for TokenError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Rejected(reason) => Self::TransactionRejected(reason),
            WalletError::Reverted { tx_hash, reason } => {
                Self::TransactionReverted { tx_hash, reason }
            }
            WalletError::NotConnected => Self::NoActiveAccount,
            other => Self::Wallet(other),
        }
    }
}
