//! Network presets.
//!
//! Provides the chain ID each supported network is expected to report, used to
//! fill transactions signed away from the node.

use serde::{Deserialize, Serialize};

/// Network the token is deployed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Mainnet,
    #[default]
    Sepolia,
    /// Local development node (anvil / hardhat)
    Local,
}

impl NetworkType {
    /// Chain ID for EIP-155 replay protection.
    pub const fn chain_id(self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Sepolia => 11155111,
            Self::Local => 31337,
        }
    }
}
