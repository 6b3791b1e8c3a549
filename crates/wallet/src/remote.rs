//! Wallet whose keys are held by an external signer-proxy.
//!
//! Account access and signatures come from the proxy. The chain provider
//! executes reads, fills nonce/fees/gas, and broadcasts the signed bytes.

use crate::{CallRequest, Receipt, Wallet, WalletError};
use alloy_primitives::{Address, Bytes};
use alloy_provider::Provider;
use client::{ClientError, RemoteSigner};
use tracing::{info, warn};

pub struct RemoteWallet<P> {
    provider: P,
    signer: RemoteSigner,
}

impl<P> RemoteWallet<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P, signer: RemoteSigner) -> Self {
        Self { provider, signer }
    }

    /// Detect a remote wallet.
    ///
    /// Returns `None` when the chain endpoint does not answer.
    pub async fn detect(provider: P, signer: RemoteSigner) -> Option<Self> {
        let chain_id = client::probe(&provider).await?;
        check_chain_id(chain_id, &signer);
        Some(Self::new(provider, signer))
    }
}

/// Warn when the node's chain differs from the one the signer signs for.
fn check_chain_id(chain_id: u64, signer: &RemoteSigner) -> bool {
    let matches = chain_id == signer.chain_id();
    if !matches {
        warn!(
            chain_id,
            expected = signer.chain_id(),
            "Chain ID differs from the signer's, signatures will not be valid here"
        );
    }
    matches
}

impl<P> Wallet for RemoteWallet<P>
where
    P: Provider + Clone,
{
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.signer.request_accounts().await?)
    }

    async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.signer.accounts().await?)
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

        let tx = client::fill_transaction(
            request.into_transaction(),
            &self.provider,
            from,
            self.signer.chain_id(),
        )
        .await?;

        let raw = self.signer.sign_transaction(tx).await?;

        let pending = self
            .provider
            .send_raw_transaction(&raw)
            .await
            .map_err(ClientError::from)?;

        let tx_hash = *pending.tx_hash();
        info!(%tx_hash, %from, "Signed transaction broadcast, waiting for receipt");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| WalletError::Rpc(e.to_string()))?;

        Ok(Receipt::from(&receipt))
    }
}
