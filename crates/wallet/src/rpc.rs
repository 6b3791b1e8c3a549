//! Wallet backed by an RPC node.
//!
//! Signing happens wherever the provider's stack puts it: in the node for
//! node-managed accounts (`eth_sendTransaction`), or in a local
//! `EthereumWallet` layer for a provider built with a private key.

use crate::{
    error::METHOD_NOT_FOUND, CallRequest, Receipt, Wallet, WalletError,
};
use alloy_primitives::{Address, Bytes};
use alloy_provider::Provider;
use client::ClientError;
use tracing::{debug, info};

/// Serializes as an empty positional parameter list.
const NO_PARAMS: [(); 0] = [];

pub struct RpcWallet<P> {
    provider: P,
    /// Accounts whose keys live in the provider's signing layer
    local_accounts: Vec<Address>,
}

impl<P> RpcWallet<P>
where
    P: Provider + Clone,
{
    /// Wallet using the node's own accounts.
    pub const fn new(provider: P) -> Self {
        Self {
            provider,
            local_accounts: Vec::new(),
        }
    }

    /// Detect a wallet behind `provider`.
    ///
    /// Returns `None` when the endpoint does not answer `eth_chainId`.
    pub async fn detect(provider: P) -> Option<Self> {
        let chain_id = client::probe(&provider).await?;
        debug!(chain_id, "Detected RPC wallet provider");
        Some(Self::new(provider))
    }

    /// Register an account signed for locally by the provider's wallet layer.
    ///
    /// Once any local account is registered, the node's accounts are ignored.
    pub fn with_local_account(mut self, account: Address) -> Self {
        self.local_accounts.push(account);
        self
    }

    pub const fn provider(&self) -> &P {
        &self.provider
    }

    async fn node_accounts(&self, method: &'static str) -> Result<Vec<Address>, ClientError> {
        Ok(self
            .provider
            .raw_request::<_, Vec<Address>>(method.into(), NO_PARAMS)
            .await?)
    }
}

impl<P> Wallet for RpcWallet<P>
where
    P: Provider + Clone,
{
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        if !self.local_accounts.is_empty() {
            return Ok(self.local_accounts.clone());
        }

        match self.node_accounts("eth_requestAccounts").await {
            Ok(accounts) => Ok(accounts),
            // Dev nodes grant access implicitly and don't implement the method
            Err(ClientError::Rpc { code, .. }) if code == METHOD_NOT_FOUND => {
                debug!("eth_requestAccounts unsupported, falling back to eth_accounts");
                Ok(self.node_accounts("eth_accounts").await?)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        if !self.local_accounts.is_empty() {
            return Ok(self.local_accounts.clone());
        }

        Ok(self.node_accounts("eth_accounts").await?)
    }

    async fn call(&self, request: CallRequest) -> Result<Bytes, WalletError> {
        let output = self
            .provider
            .call(request.into_transaction())
            .await
            .map_err(ClientError::from)?;
        Ok(output)
    }

    async fn send(&self, request: CallRequest) -> Result<Receipt, WalletError> {
        let from = request.from.ok_or(WalletError::NotConnected)?;

        let pending = self
            .provider
            .send_transaction(request.into_transaction())
            .await
            .map_err(ClientError::from)?;

        let tx_hash = *pending.tx_hash();
        info!(%tx_hash, %from, "Transaction submitted, waiting for receipt");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| WalletError::Rpc(e.to_string()))?;

        Ok(Receipt::from(&receipt))
    }
}
