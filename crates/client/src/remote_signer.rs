//! Client for an external signer-proxy that holds the user's keys.
//!
//! The proxy speaks a subset of the wallet JSON-RPC surface: `eth_requestAccounts`
//! to grant access, `eth_accounts` to list granted accounts, and
//! `eth_signTransaction` to sign a fully filled transaction. Broadcasting stays
//! with the chain provider.

use crate::ClientError;
use alloy_primitives::{Address, Bytes};
use alloy_rpc_types::TransactionRequest;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

/// Serializes as an empty positional parameter list.
const NO_PARAMS: [(); 0] = [];

/// A signer-proxy client.
///
/// # Example
///
/// ```ignore
/// let signer = RemoteSigner::new("http://localhost:9060", 11155111);
/// let accounts = signer.request_accounts().await?;
/// let signed_tx = signer.sign_transaction(filled_tx).await?;
/// provider.send_raw_transaction(&signed_tx).await?;
/// ```
#[derive(Debug, Clone)]
pub struct RemoteSigner {
    client: reqwest::Client,
    proxy_url: String,
    chain_id: u64,
}

impl RemoteSigner {
    /// Creates a new remote signer.
    ///
    /// # Arguments
    /// * `proxy_url` - The URL of the signer-proxy service (e.g., "http://localhost:9060")
    /// * `chain_id` - The chain ID for EIP-155 replay protection
    pub fn new(proxy_url: impl Into<String>, chain_id: u64) -> Self {
        Self::with_client(reqwest::Client::new(), proxy_url, chain_id)
    }

    /// Creates a new remote signer with a custom HTTP client.
    pub fn with_client(client: reqwest::Client, proxy_url: impl Into<String>, chain_id: u64) -> Self {
        Self {
            client,
            proxy_url: proxy_url.into(),
            chain_id,
        }
    }

    /// Returns the chain ID.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Ask the proxy to grant access to its accounts.
    ///
    /// A refusal comes back as [`ClientError::Rpc`] with code 4001.
    pub async fn request_accounts(&self) -> Result<Vec<Address>, ClientError> {
        self.request("eth_requestAccounts", NO_PARAMS).await
    }

    /// List accounts the proxy has already granted.
    pub async fn accounts(&self) -> Result<Vec<Address>, ClientError> {
        self.request("eth_accounts", NO_PARAMS).await
    }

    /// Signs a transaction via the signer-proxy.
    ///
    /// Returns the signed transaction as raw bytes, ready to be broadcast
    /// via `provider.send_raw_transaction()`.
    pub async fn sign_transaction(&self, tx: TransactionRequest) -> Result<Bytes, ClientError> {
        let signed: SignedTransactionResponse = self.request("eth_signTransaction", [tx]).await?;
        signed
            .raw
            .parse()
            .map_err(|e| ClientError::Other(format!("signer-proxy returned malformed raw tx: {e}")))
    }

    async fn request<P, R>(&self, method: &'static str, params: P) -> Result<R, ClientError>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        debug!(method, url = %self.proxy_url, "Signer-proxy request");

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: 1,
        };

        let response = self
            .client
            .post(&self.proxy_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(ClientError::Transport(format!(
                "signer-proxy returned {status}: {body}"
            )));
        }

        let rpc_response: JsonRpcResponse<R> = response
            .json()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        rpc_response.into_result()
    }
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<T> {
    jsonrpc: &'static str,
    method: &'static str,
    params: T,
    id: u32,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

impl<T> JsonRpcResponse<T> {
    fn into_result(self) -> Result<T, ClientError> {
        match (self.result, self.error) {
            (_, Some(error)) => Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            }),
            (Some(result), None) => Ok(result),
            (None, None) => Err(ClientError::Other(
                "JSON-RPC response has neither result nor error".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Response from eth_signTransaction containing the signed transaction.
#[derive(Debug, Deserialize)]
struct SignedTransactionResponse {
    /// The signed transaction as hex-encoded RLP.
    raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_accounts_result() {
        let response: JsonRpcResponse<Vec<Address>> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"result":["0x5cffa347b0ae99cc01e5c01714ca5658e54a23d1"]}"#,
        )
        .unwrap();

        let accounts = response.into_result().unwrap();
        assert_eq!(
            accounts,
            vec![address!("5CFFA347b0aE99cc01E5c01714cA5658e54a23D1")]
        );
    }

    #[test]
    fn test_user_rejection_keeps_code() {
        let response: JsonRpcResponse<Vec<Address>> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":4001,"message":"User rejected the request."}}"#,
        )
        .unwrap();

        match response.into_result() {
            Err(ClientError::Rpc { code, message }) => {
                assert_eq!(code, 4001);
                assert!(message.contains("rejected"));
            }
            other => panic!("expected rpc error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_response() {
        let response: JsonRpcResponse<Vec<Address>> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1}"#).unwrap();
        assert!(matches!(response.into_result(), Err(ClientError::Other(_))));
    }

    #[test]
    fn test_request_shape() {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method: "eth_accounts",
            params: NO_PARAMS,
            id: 1,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["method"], "eth_accounts");
        assert_eq!(json["params"], serde_json::json!([]));
        assert_eq!(json["jsonrpc"], "2.0");
    }

    #[test]
    fn test_chain_id() {
        let signer = RemoteSigner::new("http://localhost:9060", 11155111);
        assert_eq!(signer.chain_id(), 11155111);
    }
}
