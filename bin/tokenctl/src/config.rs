use ::config::{NetworkType, TokenConfig, WalletKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level tokenctl configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint url
    pub rpc_url: String,

    /// Network the token lives on
    #[serde(default)]
    pub network: NetworkType,

    /// Token contract and burn amount
    #[serde(default)]
    pub token: TokenConfig,

    /// Wallet backend
    #[serde(default)]
    pub wallet: WalletKind,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> eyre::Result<Self> {
        let config: Self = toml::from_str(contents)?;
        Ok(config)
    }
}
