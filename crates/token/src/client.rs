use crate::{BatchTransferJob, Sequential, SubmissionPolicy, TokenError};
use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use binding::token::IERC20;
use config::{BurnAmount, TokenConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};
use wallet::{CallRequest, Receipt, Wallet, WalletSession};

/// Token metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub decimals: u8,
    /// In smallest units; changes with burns and mints
    pub total_supply: U256,
}

/// Outcome of each metadata read, kept separate so one failing field does not
/// hide the others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataReads {
    pub name: Result<String, TokenError>,
    pub decimals: Result<u8, TokenError>,
    pub total_supply: Result<U256, TokenError>,
}

impl MetadataReads {
    /// All fields, or the first failure.
    pub fn into_metadata(self) -> Result<TokenMetadata, TokenError> {
        Ok(TokenMetadata {
            name: self.name?,
            decimals: self.decimals?,
            total_supply: self.total_supply?,
        })
    }
}

/// Reads and mutates one token contract on behalf of the session's active account.
///
/// The active account is captured at construction. Writes go through the
/// session, which admits one at a time: a second write, from this client or any
/// other on the same session, waits until the first one's receipt is in.
pub struct TokenClient<W> {
    session: Arc<WalletSession<W>>,
    contract: Address,
    account: Address,
    burn_amount: BurnAmount,
}

impl<W: Wallet> TokenClient<W> {
    /// Bind to the configured contract.
    ///
    /// Fails with [`TokenError::NoActiveAccount`] unless the session is connected.
    pub fn new(session: Arc<WalletSession<W>>, config: &TokenConfig) -> Result<Self, TokenError> {
        let account = session
            .active_account()
            .ok_or(TokenError::NoActiveAccount)?;

        Ok(Self {
            session,
            contract: config.address,
            account,
            burn_amount: config.burn_amount,
        })
    }

    pub const fn contract(&self) -> Address {
        self.contract
    }

    /// The account writes are signed with.
    pub const fn account(&self) -> Address {
        self.account
    }

    pub const fn session(&self) -> &Arc<WalletSession<W>> {
        &self.session
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────────

    /// Fetch name, decimals and total supply concurrently.
    pub async fn get_metadata(&self) -> MetadataReads {
        let (name, decimals, total_supply) = tokio::join!(
            self.read(IERC20::nameCall {}),
            self.read(IERC20::decimalsCall {}),
            self.read(IERC20::totalSupplyCall {}),
        );

        MetadataReads {
            name,
            decimals,
            total_supply,
        }
    }

    /// Token balance of `account`, never cached.
    pub async fn get_balance(&self, account: Address) -> Result<U256, TokenError> {
        self.read(IERC20::balanceOfCall { account }).await
    }

    /// Token balance of the active account.
    pub async fn balance(&self) -> Result<U256, TokenError> {
        self.get_balance(self.account).await
    }

    pub async fn decimals(&self) -> Result<u8, TokenError> {
        self.read(IERC20::decimalsCall {}).await
    }

    pub async fn allowance(&self, owner: Address, spender: Address) -> Result<U256, TokenError> {
        self.read(IERC20::allowanceCall { owner, spender }).await
    }

    async fn read<C: SolCall>(&self, call: C) -> Result<C::Return, TokenError> {
        let method = C::SIGNATURE;
        let failed = |reason: String| TokenError::ReadCallFailed { method, reason };

        let request = CallRequest::new(self.contract, call.abi_encode().into());
        let wallet = self.session.wallet().map_err(|e| failed(e.to_string()))?;

        debug!(method, contract = %self.contract, "Read call");
        let output = wallet.call(request).await.map_err(|e| {
            warn!(method, error = %e, "Read call failed");
            failed(e.to_string())
        })?;

        C::abi_decode_returns(&output).map_err(|e| failed(e.to_string()))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Writes
    // ─────────────────────────────────────────────────────────────────────────────

    /// Transfer `amount` to `to`.
    ///
    /// The balance is not refreshed; query it again afterwards.
    pub async fn transfer(&self, to: Address, amount: U256) -> Result<Receipt, TokenError> {
        info!(%to, %amount, "Transferring tokens");
        self.write(IERC20::transferCall {
            recipient: to,
            amount,
        })
        .await
    }

    /// Allow `spender` to move up to `amount` of the active account's tokens.
    pub async fn approve(&self, spender: Address, amount: U256) -> Result<Receipt, TokenError> {
        info!(%spender, %amount, "Approving spender");
        self.write(IERC20::approveCall { spender, amount }).await
    }

    /// Burn the configured amount from the active account.
    pub async fn burn(&self) -> Result<Receipt, TokenError> {
        let amount = self.burn_amount().await?;
        self.burn_from(self.account, amount).await
    }

    /// Invoke the contract's `burn(holder, amount)` entry point.
    pub async fn burn_from(&self, holder: Address, amount: U256) -> Result<Receipt, TokenError> {
        info!(%holder, %amount, "Burning tokens");
        self.write(IERC20::burnCall {
            account: holder,
            amount,
        })
        .await
    }

    /// The configured burn amount in smallest units.
    ///
    /// Whole-token amounts are scaled by the contract's current `decimals()`.
    pub async fn burn_amount(&self) -> Result<U256, TokenError> {
        match self.burn_amount {
            BurnAmount::Exact(amount) => Ok(amount),
            BurnAmount::WholeTokens(_) => {
                let decimals = self.decimals().await?;
                self.burn_amount
                    .to_smallest_units(decimals)
                    .ok_or(TokenError::BurnAmountOverflow { decimals })
            }
        }
    }

    /// Transfer `amounts[i]` to `recipients[i]`, one after another, in order.
    ///
    /// Mismatched lengths fail before anything is submitted. See
    /// [`Sequential`] for the partial-failure contract.
    pub async fn batch_transfer(
        &self,
        recipients: &[Address],
        amounts: &[U256],
    ) -> Result<Vec<Receipt>, TokenError> {
        let job = BatchTransferJob::zip(recipients, amounts)?;
        self.batch_transfer_with(&Sequential, &job).await
    }

    /// Submit a batch through `policy`.
    pub async fn batch_transfer_with<S: SubmissionPolicy>(
        &self,
        policy: &S,
        job: &BatchTransferJob,
    ) -> Result<Vec<Receipt>, TokenError> {
        info!(transfers = job.len(), "Starting batch transfer");
        let receipts = policy.submit(self, job.requests()).await?;
        info!(transfers = receipts.len(), "Batch transfer complete");
        Ok(receipts)
    }

    async fn write<C: SolCall>(&self, call: C) -> Result<Receipt, TokenError> {
        let method = C::SIGNATURE;
        let request = CallRequest::new(self.contract, call.abi_encode().into()).sender(self.account);

        let receipt = self.session.send(request).await.inspect_err(|e| {
            warn!(method, error = %e, "Transaction failed");
        })?;

        if !receipt.success {
            warn!(method, tx_hash = %receipt.tx_hash, "Transaction reverted");
            return Err(TokenError::TransactionReverted {
                tx_hash: Some(receipt.tx_hash),
                reason: format!("{method} reverted"),
            });
        }

        info!(
            method,
            tx_hash = %receipt.tx_hash,
            block_number = receipt.block_number,
            gas_used = receipt.gas_used,
            "Transaction confirmed"
        );
        Ok(receipt)
    }
}
