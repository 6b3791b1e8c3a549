//! Token and wallet configuration.
//!
//! Defaults point at the deployed token and burn one whole token.

use alloy_primitives::{address, Address, U256};
use serde::{Deserialize, Serialize};

/// Address of the deployed token contract.
pub const DEFAULT_TOKEN_ADDRESS: Address = address!("0x21330fD5DA29568FbbB7D9dBCD25eCBD22864073");

/// How much a `burn` destroys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurnAmount {
    /// Whole tokens, scaled by the on-chain `decimals()` at burn time.
    WholeTokens(u64),
    /// Exact amount in the token's smallest unit.
    Exact(U256),
}

impl Default for BurnAmount {
    fn default() -> Self {
        Self::WholeTokens(1)
    }
}

impl BurnAmount {
    /// Resolve to smallest units given the token's decimals.
    ///
    /// Returns `None` if the scaled amount does not fit in a `U256`.
    pub fn to_smallest_units(self, decimals: u8) -> Option<U256> {
        match self {
            Self::Exact(amount) => Some(amount),
            Self::WholeTokens(tokens) => {
                let scale = U256::from(10u8).checked_pow(U256::from(decimals))?;
                U256::from(tokens).checked_mul(scale)
            }
        }
    }
}

/// Token contract configuration.
///
/// Missing fields fall back to [`TokenConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Token contract address
    pub address: Address,
    /// Amount destroyed by a burn
    pub burn_amount: BurnAmount,
}

impl Default for TokenConfig {
    fn default() -> Self {
        TokenConfigBuilder::new().build()
    }
}

/// Builder for custom token configurations.
#[derive(Debug, Clone)]
pub struct TokenConfigBuilder {
    address: Address,
    burn_amount: BurnAmount,
}

impl Default for TokenConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenConfigBuilder {
    /// Start with the deployed token and a one-token burn.
    pub const fn new() -> Self {
        Self {
            address: DEFAULT_TOKEN_ADDRESS,
            burn_amount: BurnAmount::WholeTokens(1),
        }
    }

    /// Override the token contract address.
    pub const fn address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }

    /// Override the burn amount.
    pub const fn burn_amount(mut self, burn_amount: BurnAmount) -> Self {
        self.burn_amount = burn_amount;
        self
    }

    /// Build the token configuration.
    pub const fn build(self) -> TokenConfig {
        TokenConfig {
            address: self.address,
            burn_amount: self.burn_amount,
        }
    }
}

/// Where accounts and signatures come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum WalletKind {
    /// Accounts managed by the RPC node (`eth_requestAccounts`, `eth_sendTransaction`)
    #[default]
    Node,
    /// A local private key, supplied at runtime
    LocalKey,
    /// An external signer-proxy holding the key
    RemoteSigner {
        /// Signer-proxy JSON-RPC endpoint
        url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TokenConfig::default();
        assert_eq!(config.address, DEFAULT_TOKEN_ADDRESS);
        assert_eq!(config.burn_amount, BurnAmount::WholeTokens(1));
    }

    #[test]
    fn test_custom_config_builder() {
        let custom = address!("1111111111111111111111111111111111111111");

        let config = TokenConfigBuilder::new()
            .address(custom)
            .burn_amount(BurnAmount::Exact(U256::from(5)))
            .build();

        assert_eq!(config.address, custom);
        assert_eq!(config.burn_amount, BurnAmount::Exact(U256::from(5)));
    }

    #[test]
    fn test_one_whole_token_scales_by_decimals() {
        let amount = BurnAmount::default().to_smallest_units(18).unwrap();
        assert_eq!(amount, U256::from(1_000_000_000_000_000_000u128));

        let amount = BurnAmount::WholeTokens(3).to_smallest_units(0).unwrap();
        assert_eq!(amount, U256::from(3));
    }

    #[test]
    fn test_exact_burn_ignores_decimals() {
        let amount = BurnAmount::Exact(U256::from(42)).to_smallest_units(18);
        assert_eq!(amount, Some(U256::from(42)));
    }

    #[test]
    fn test_burn_amount_overflow() {
        assert_eq!(BurnAmount::WholeTokens(u64::MAX).to_smallest_units(255), None);
    }

    #[test]
    fn test_wallet_kind_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            wallet: WalletKind,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
            [wallet]
            backend = "remote_signer"
            url = "http://localhost:9060"
            "#,
        )
        .unwrap();
        assert_eq!(
            parsed.wallet,
            WalletKind::RemoteSigner {
                url: "http://localhost:9060".to_string()
            }
        );

        let parsed: Wrapper = toml::from_str(
            r#"
            [wallet]
            backend = "local_key"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.wallet, WalletKind::LocalKey);
    }

    #[test]
    fn test_partial_token_table() {
        let parsed: TokenConfig = toml::from_str(
            r#"
            [burn_amount]
            exact = "0x64"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.address, DEFAULT_TOKEN_ADDRESS);
        assert_eq!(parsed.burn_amount, BurnAmount::Exact(U256::from(100)));
    }

    #[test]
    fn test_burn_amount_from_toml() {
        let parsed: TokenConfig = toml::from_str(
            r#"
            address = "0x1111111111111111111111111111111111111111"

            [burn_amount]
            whole_tokens = 2
            "#,
        )
        .unwrap();
        assert_eq!(parsed.burn_amount, BurnAmount::WholeTokens(2));
    }
}
