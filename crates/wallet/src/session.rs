use crate::{CallRequest, Receipt, Wallet, WalletError};
use alloy_primitives::Address;
use std::sync::{PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// A connection to the user's wallet.
///
/// Created from the outcome of provider detection; [`connect`](Self::connect)
/// asks for account access and fixes the active account. The session is shared
/// by handle (`Arc`) with every client acting on the user's behalf.
///
/// Sends go through [`send`](Self::send), which admits one transaction at a
/// time across all of those clients.
pub struct WalletSession<W> {
    wallet: Option<W>,
    accounts: RwLock<Vec<Address>>,
    send_lock: Mutex<()>,
}

impl<W: Wallet> WalletSession<W> {
    /// Wrap a detected wallet, or `None` when detection found nothing.
    pub fn new(wallet: Option<W>) -> Self {
        Self {
            wallet,
            accounts: RwLock::new(Vec::new()),
            send_lock: Mutex::new(()),
        }
    }

    /// Request account access and make the first authorized account active.
    ///
    /// Not retried: a refusal ends this attempt and the user has to call
    /// `connect` again.
    pub async fn connect(&self) -> Result<Address, WalletError> {
        let wallet = self.wallet()?;

        let accounts = match wallet.request_accounts().await {
            Ok(accounts) => accounts,
            Err(WalletError::Rejected(reason)) => {
                warn!(%reason, "Account access rejected");
                return Err(WalletError::PermissionDenied(reason));
            }
            Err(e) => return Err(e),
        };

        let Some(active) = accounts.first().copied() else {
            warn!("Wallet authorized no accounts");
            return Err(WalletError::PermissionDenied(
                "no accounts authorized".to_string(),
            ));
        };

        info!(account = %active, authorized = accounts.len(), "Wallet connected");
        *self.accounts.write().unwrap_or_else(PoisonError::into_inner) = accounts;

        Ok(active)
    }

    /// The account transactions are signed with, once connected.
    pub fn active_account(&self) -> Option<Address> {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .first()
            .copied()
    }

    /// All accounts authorized at connect time.
    pub fn accounts(&self) -> Vec<Address> {
        self.accounts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Ask the wallet which accounts are currently authorized.
    ///
    /// Does not change the active account.
    pub async fn authorized_accounts(&self) -> Result<Vec<Address>, WalletError> {
        self.wallet()?.accounts().await
    }

    pub fn is_connected(&self) -> bool {
        self.active_account().is_some()
    }

    /// The underlying wallet.
    pub fn wallet(&self) -> Result<&W, WalletError> {
        self.wallet.as_ref().ok_or(WalletError::ProviderNotFound)
    }

    /// Sign and submit through the wallet, waiting for the receipt.
    ///
    /// Holds the session's send lock until the receipt is in, so a second send
    /// from any client on this session waits for the first.
    pub async fn send(&self, request: CallRequest) -> Result<Receipt, WalletError> {
        let wallet = self.wallet()?;
        let _guard = self.send_lock.lock().await;
        wallet.send(request).await
    }
}
