//! Command-line client for the token contract.
//!
//! - `info`: name, decimals and total supply
//! - `accounts`: the active and authorized accounts
//! - `balance`: token balance of an account
//! - `transfer` / `approve` / `burn`: state-changing calls from the active account
//! - `multi-send`: sequential transfers to several recipients

use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use client::RemoteSigner;
use config::WalletKind;
use tokenctl::config::Config;
use tracing::info;
use wallet::{RemoteWallet, RpcWallet, Wallet};

#[derive(Parser)]
#[command(name = "tokenctl")]
#[command(about = "Read and manage an ERC20 token")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Private key for the `local_key` wallet backend (hex string, with or without 0x prefix)
    #[arg(short = 'k', long, env = "PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Read and print amounts in display units instead of smallest units
    #[arg(long, global = true)]
    human: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show token name, decimals and total supply
    Info,

    /// Show the active and authorized accounts
    Accounts,

    /// Show a token balance (defaults to the active account)
    Balance { address: Option<Address> },

    /// Transfer tokens from the active account
    Transfer {
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: String,
    },

    /// Allow a spender to move the active account's tokens
    Approve {
        #[arg(long)]
        spender: String,
        #[arg(long)]
        amount: String,
    },

    /// Burn the configured amount from the active account
    Burn,

    /// Transfer to several recipients, one after another
    MultiSend {
        /// Comma-separated recipient addresses
        #[arg(long)]
        recipients: String,
        /// Comma-separated amounts, one per recipient
        #[arg(long)]
        amounts: String,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_file(&cli.config)?;

    info!("Loaded config: {}", cli.config);
    info!("  RPC URL: {}", config.rpc_url);
    info!("  Network: {:?}", config.network);
    info!("  Token: {}", config.token.address);

    match &config.wallet {
        WalletKind::Node => {
            let provider = client::create_provider(&config.rpc_url).await?;
            let wallet = RpcWallet::detect(provider).await;
            run(wallet, &config, &cli).await
        }
        WalletKind::LocalKey => {
            let Some(private_key) = cli.private_key.as_deref() else {
                eyre::bail!("The local_key wallet needs --private-key or PRIVATE_KEY");
            };
            let provider = client::create_wallet_provider(&config.rpc_url, private_key)?;
            let account = client::signer_address(private_key)?;
            let wallet = RpcWallet::detect(provider)
                .await
                .map(|wallet| wallet.with_local_account(account));
            run(wallet, &config, &cli).await
        }
        WalletKind::RemoteSigner { url } => {
            let provider = client::create_provider(&config.rpc_url).await?;
            let signer = RemoteSigner::new(url.as_str(), config.network.chain_id());
            let wallet = RemoteWallet::detect(provider, signer).await;
            run(wallet, &config, &cli).await
        }
    }
}

async fn run<W: Wallet>(wallet: Option<W>, config: &Config, cli: &Cli) -> eyre::Result<()> {
    let client = tokenctl::connect(wallet, &config.token).await?;
    let human = cli.human;

    match &cli.command {
        Command::Info => {
            tokenctl::show_info(&client, human).await;
        }
        Command::Accounts => {
            tokenctl::show_accounts(&client).await?;
        }
        Command::Balance { address } => {
            tokenctl::show_balance(&client, *address, human).await?;
        }
        Command::Transfer { to, amount } => {
            tokenctl::transfer(&client, to, amount, human).await?;
        }
        Command::Approve { spender, amount } => {
            tokenctl::approve(&client, spender, amount, human).await?;
        }
        Command::Burn => {
            tokenctl::burn(&client, human).await?;
        }
        Command::MultiSend {
            recipients,
            amounts,
        } => {
            tokenctl::multi_send(&client, recipients, amounts, human).await?;
        }
    }

    Ok(())
}
