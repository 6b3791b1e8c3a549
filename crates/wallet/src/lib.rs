//! Wallet connection for the token client.
//!
//! This crate provides:
//! - [`Wallet`]: the wallet-provider interface (account access, read calls, signed sends)
//! - [`WalletSession`]: the connected session holding the active account
//! - Backends: [`RpcWallet`] (node-managed or local-key accounts) and
//!   [`RemoteWallet`] (keys held by an external signer-proxy)

pub mod error;
pub mod remote;
pub mod rpc;
pub mod session;

pub use error::WalletError;
pub use remote::RemoteWallet;
pub use rpc::RpcWallet;
pub use session::WalletSession;

use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, Bytes, TxHash};
use alloy_rpc_types::{TransactionReceipt, TransactionRequest};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// An ABI-encoded contract call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    /// Sender; required for sends, optional for reads
    pub from: Option<Address>,
    /// Contract address
    pub to: Address,
    /// Calldata (selector + encoded arguments)
    pub input: Bytes,
}

impl CallRequest {
    pub const fn new(to: Address, input: Bytes) -> Self {
        Self {
            from: None,
            to,
            input,
        }
    }

    pub fn sender(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Convert into an unfilled transaction request.
    pub fn into_transaction(self) -> TransactionRequest {
        let mut tx = TransactionRequest::default()
            .with_to(self.to)
            .with_input(self.input);
        if let Some(from) = self.from {
            tx.set_from(from);
        }
        tx
    }
}

/// Confirmation record of an included transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Block number where transaction was included
    pub block_number: Option<u64>,
    /// Gas used
    pub gas_used: u64,
    /// False if the transaction reverted
    pub success: bool,
}

impl From<&TransactionReceipt> for Receipt {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            success: receipt.status(),
        }
    }
}

/// Wallet provider: holds the keys and talks to the chain on the user's behalf.
pub trait Wallet: Send + Sync {
    /// Ask the user for account access.
    ///
    /// May prompt outside this process. Returns the authorized accounts.
    fn request_accounts(&self) -> impl Future<Output = Result<Vec<Address>, WalletError>> + Send;

    /// Accounts already authorized, without prompting.
    fn accounts(&self) -> impl Future<Output = Result<Vec<Address>, WalletError>> + Send;

    /// Execute a read-only call and return the raw return data.
    fn call(&self, request: CallRequest) -> impl Future<Output = Result<Bytes, WalletError>> + Send;

    /// Sign and broadcast a call, then wait for its receipt.
    ///
    /// An included-but-reverted transaction is returned as a receipt with
    /// `success == false`; a revert detected before broadcast is an error.
    fn send(&self, request: CallRequest) -> impl Future<Output = Result<Receipt, WalletError>> + Send;
}
