pub mod config;
pub mod units;

use alloy_primitives::{Address, U256};
use ::config::TokenConfig;
use std::sync::Arc;
use token::{
    parse_address, BatchTransferJob, MetadataReads, Receipt, Sequential, TokenClient, TokenError,
};
use tracing::{error, info, warn};
use wallet::{Wallet, WalletSession};

/// Open a session over a detected wallet and bind a token client to it.
///
/// `None` means detection found no wallet; this fails with the
/// provider-not-found error before anything is requested.
pub async fn connect<W: Wallet>(
    wallet: Option<W>,
    token: &TokenConfig,
) -> eyre::Result<TokenClient<W>> {
    let session = Arc::new(WalletSession::new(wallet));
    let account = session.connect().await?;
    info!(%account, contract = %token.address, "Session ready");

    Ok(TokenClient::new(session, token)?)
}

/// Decimals to render amounts with, when display units are requested.
async fn display_decimals<W: Wallet>(
    client: &TokenClient<W>,
    human: bool,
) -> eyre::Result<Option<u8>> {
    if !human {
        return Ok(None);
    }
    Ok(Some(client.decimals().await?))
}

/// Log token metadata, one line per field.
///
/// A field that fails to read is reported and does not hide the others.
pub async fn show_info<W: Wallet>(client: &TokenClient<W>, human: bool) -> MetadataReads {
    let reads = client.get_metadata().await;

    match &reads.name {
        Ok(name) => info!("Name: {name}"),
        Err(e) => warn!("Name: unavailable ({e})"),
    }
    match &reads.decimals {
        Ok(decimals) => info!("Decimals: {decimals}"),
        Err(e) => warn!("Decimals: unavailable ({e})"),
    }
    match (&reads.total_supply, &reads.decimals) {
        (Ok(supply), Ok(decimals)) if human => {
            info!("Total supply: {}", units::format_amount(*supply, Some(*decimals)));
        }
        (Ok(supply), _) => info!("Total supply: {supply}"),
        (Err(e), _) => warn!("Total supply: unavailable ({e})"),
    }

    reads
}

/// Log the connected and currently authorized accounts.
pub async fn show_accounts<W: Wallet>(client: &TokenClient<W>) -> eyre::Result<Vec<Address>> {
    info!("Active: {}", client.account());

    let authorized = client.session().authorized_accounts().await?;
    for (i, account) in authorized.iter().enumerate() {
        info!("  [{i}] {account}");
    }
    Ok(authorized)
}

/// Balance of `account`, or of the active account.
pub async fn show_balance<W: Wallet>(
    client: &TokenClient<W>,
    account: Option<Address>,
    human: bool,
) -> eyre::Result<U256> {
    let account = account.unwrap_or_else(|| client.account());
    let balance = client.get_balance(account).await?;
    let decimals = display_decimals(client, human).await?;

    info!("Balance of {account}: {}", units::format_amount(balance, decimals));
    Ok(balance)
}

pub async fn transfer<W: Wallet>(
    client: &TokenClient<W>,
    to: &str,
    amount: &str,
    human: bool,
) -> eyre::Result<Receipt> {
    let to = parse_address(to)?;
    let decimals = display_decimals(client, human).await?;
    let amount = units::parse_amount(amount, decimals)?;

    let receipt = client.transfer(to, amount).await?;
    log_receipt(&receipt);
    show_balance(client, None, human).await?;

    Ok(receipt)
}

pub async fn approve<W: Wallet>(
    client: &TokenClient<W>,
    spender: &str,
    amount: &str,
    human: bool,
) -> eyre::Result<Receipt> {
    let spender = parse_address(spender)?;
    let decimals = display_decimals(client, human).await?;
    let amount = units::parse_amount(amount, decimals)?;

    let receipt = client.approve(spender, amount).await?;
    log_receipt(&receipt);

    let allowance = client.allowance(client.account(), spender).await?;
    info!("Allowance for {spender}: {}", units::format_amount(allowance, decimals));

    Ok(receipt)
}

/// Burn the configured amount from the active account.
pub async fn burn<W: Wallet>(client: &TokenClient<W>, human: bool) -> eyre::Result<Receipt> {
    let receipt = client.burn().await?;
    log_receipt(&receipt);
    show_balance(client, None, human).await?;

    Ok(receipt)
}

/// Build a batch from comma-separated lists.
///
/// With `decimals`, amounts are in display units. Lists of different length
/// fail before any entry is parsed.
pub fn parse_batch(
    recipients: &str,
    amounts: &str,
    decimals: Option<u8>,
) -> eyre::Result<BatchTransferJob> {
    BatchTransferJob::from_csv_with(recipients, amounts, |amount| {
        units::parse_amount(amount, decimals)
    })
}

/// Send to several recipients from comma-separated lists.
///
/// Nothing is submitted unless every entry parses.
pub async fn multi_send<W: Wallet>(
    client: &TokenClient<W>,
    recipients: &str,
    amounts: &str,
    human: bool,
) -> eyre::Result<Vec<Receipt>> {
    let decimals = display_decimals(client, human).await?;
    let job = parse_batch(recipients, amounts, decimals)?;

    let receipts = match client.batch_transfer_with(&Sequential, &job).await {
        Ok(receipts) => receipts,
        Err(TokenError::BatchTransferPartiallyFailed {
            index,
            completed,
            source,
        }) => {
            for receipt in &completed {
                log_receipt(receipt);
            }
            error!(index, "Batch stopped; later transfers were not submitted");
            return Err(TokenError::BatchTransferPartiallyFailed {
                index,
                completed,
                source,
            }
            .into());
        }
        Err(e) => return Err(e.into()),
    };

    for receipt in &receipts {
        log_receipt(receipt);
    }
    show_balance(client, None, human).await?;

    Ok(receipts)
}

fn log_receipt(receipt: &Receipt) {
    info!(
        tx_hash = %receipt.tx_hash,
        block = ?receipt.block_number,
        gas_used = receipt.gas_used,
        "Transaction confirmed"
    );
}
