//! Configuration types for the token client.
//!
//! This crate provides:
//! - Network presets (chain IDs)
//! - The token contract address and burn amount
//! - Wallet backend selection

pub mod network;
pub mod token;

pub use network::NetworkType;
pub use token::{BurnAmount, TokenConfig, TokenConfigBuilder, WalletKind, DEFAULT_TOKEN_ADDRESS};
