use alloy_primitives::TxHash;
use client::ClientError;
use thiserror::Error;

/// EIP-1193: the user rejected the request.
pub const USER_REJECTED: i64 = 4001;
/// EIP-1193: the requested account or method has not been authorized.
pub const UNAUTHORIZED: i64 = 4100;
/// Code nodes use for `execution reverted` with revert data.
pub const EXECUTION_REVERTED: i64 = 3;
/// JSON-RPC: method does not exist.
pub const METHOD_NOT_FOUND: i64 = -32601;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// No wallet provider was detected
    #[error("No wallet provider found")]
    ProviderNotFound,

    /// The user declined account access
    #[error("Account access denied: {0}")]
    PermissionDenied(String),

    /// The user declined to sign a transaction
    #[error("Request rejected by user: {0}")]
    Rejected(String),

    /// The contract rejected the call
    #[error("Execution reverted: {reason}")]
    Reverted {
        /// Set when the transaction was included on chain
        tx_hash: Option<TxHash>,
        reason: String,
    },

    /// No active account to sign with
    #[error("Wallet not connected")]
    NotConnected,

    /// Network or node failure
    #[error("RPC error: {0}")]
    Rpc(String),
}

impl WalletError {
    /// Classify a JSON-RPC error response.
    pub fn from_rpc(code: i64, message: &str) -> Self {
        match code {
            USER_REJECTED => Self::Rejected(message.to_string()),
            UNAUTHORIZED => Self::PermissionDenied(message.to_string()),
            EXECUTION_REVERTED => Self::reverted(message),
            _ if message.to_ascii_lowercase().contains("revert") => Self::reverted(message),
            _ => Self::Rpc(format!("{code}: {message}")),
        }
    }

    fn reverted(message: &str) -> Self {
        Self::Reverted {
            tx_hash: None,
            reason: message.to_string(),
        }
    }
}

impl From<ClientError> for WalletError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Rpc { code, message } => Self::from_rpc(code, &message),
            other => Self::Rpc(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_rejection() {
        assert_eq!(
            WalletError::from_rpc(4001, "User denied transaction signature."),
            WalletError::Rejected("User denied transaction signature.".to_string())
        );
    }

    #[test]
    fn test_unauthorized() {
        assert!(matches!(
            WalletError::from_rpc(4100, "not authorized"),
            WalletError::PermissionDenied(_)
        ));
    }

    #[test]
    fn test_revert_by_code_and_by_message() {
        assert!(matches!(
            WalletError::from_rpc(3, "execution reverted: ERC20: burn amount exceeds balance"),
            WalletError::Reverted { tx_hash: None, .. }
        ));
        assert!(matches!(
            WalletError::from_rpc(-32000, "Execution Reverted"),
            WalletError::Reverted { .. }
        ));
    }

    #[test]
    fn test_other_codes_are_rpc_failures() {
        assert_eq!(
            WalletError::from_rpc(-32000, "nonce too low"),
            WalletError::Rpc("-32000: nonce too low".to_string())
        );
    }

    #[test]
    fn test_from_client_error() {
        let err = WalletError::from(ClientError::Rpc {
            code: 4001,
            message: "nope".to_string(),
        });
        assert_eq!(err, WalletError::Rejected("nope".to_string()));

        let err = WalletError::from(ClientError::Transport("connection refused".to_string()));
        assert!(matches!(err, WalletError::Rpc(msg) if msg.contains("connection refused")));
    }
}
