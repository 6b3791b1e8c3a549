//! Batch transfer jobs.
//!
//! A job pairs recipients with amounts position by position. The lengths are
//! checked before any entry is parsed, so a mismatched job never exists.

use crate::TokenError;
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// One transfer: `amount` smallest units to `recipient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub recipient: Address,
    pub amount: U256,
}

/// An ordered list of transfers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchTransferJob {
    requests: Vec<TransferRequest>,
}

impl BatchTransferJob {
    /// Pair recipients with amounts.
    pub fn zip(recipients: &[Address], amounts: &[U256]) -> Result<Self, TokenError> {
        check_lengths(recipients.len(), amounts.len())?;

        let requests = recipients
            .iter()
            .zip(amounts)
            .map(|(&recipient, &amount)| TransferRequest { recipient, amount })
            .collect();
        Ok(Self { requests })
    }

    /// Parse recipient and amount strings.
    ///
    /// Amounts are decimal integers in smallest units.
    pub fn from_strings<S: AsRef<str>>(recipients: &[S], amounts: &[S]) -> Result<Self, TokenError> {
        check_lengths(recipients.len(), amounts.len())?;

        let requests = recipients
            .iter()
            .zip(amounts)
            .map(|(recipient, amount)| {
                Ok(TransferRequest {
                    recipient: parse_address(recipient.as_ref())?,
                    amount: parse_amount(amount.as_ref())?,
                })
            })
            .collect::<Result<_, TokenError>>()?;
        Ok(Self { requests })
    }

    /// Parse comma-separated recipient and amount lists.
    pub fn from_csv(recipients: &str, amounts: &str) -> Result<Self, TokenError> {
        Self::from_strings(&split_csv(recipients), &split_csv(amounts))
    }

    /// Parse comma-separated lists with a caller-supplied amount parser.
    ///
    /// Lengths are checked before any entry is parsed.
    pub fn from_csv_with<F, E>(recipients: &str, amounts: &str, mut parse: F) -> Result<Self, E>
    where
        F: FnMut(&str) -> Result<U256, E>,
        E: From<TokenError>,
    {
        let recipients = split_csv(recipients);
        let amounts = split_csv(amounts);
        check_lengths(recipients.len(), amounts.len())?;

        let requests = recipients
            .iter()
            .zip(&amounts)
            .map(|(recipient, amount)| {
                Ok(TransferRequest {
                    recipient: parse_address(recipient)?,
                    amount: parse(*amount)?,
                })
            })
            .collect::<Result<_, E>>()?;
        Ok(Self { requests })
    }

    pub fn requests(&self) -> &[TransferRequest] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Sum of all amounts, `None` on overflow.
    pub fn total_amount(&self) -> Option<U256> {
        self.requests
            .iter()
            .try_fold(U256::ZERO, |total, request| total.checked_add(request.amount))
    }
}

const fn check_lengths(recipients: usize, amounts: usize) -> Result<(), TokenError> {
    if recipients != amounts {
        return Err(TokenError::MismatchedBatchLengths {
            recipients,
            amounts,
        });
    }
    Ok(())
}

fn split_csv(input: &str) -> Vec<&str> {
    if input.trim().is_empty() {
        return Vec::new();
    }
    input.split(',').map(str::trim).collect()
}

/// Parse a hex address (checksum not enforced).
pub fn parse_address(input: &str) -> Result<Address, TokenError> {
    input
        .trim()
        .parse()
        .map_err(|_| TokenError::InvalidAddress(input.to_string()))
}

/// Parse a decimal integer amount in smallest units.
pub fn parse_amount(input: &str) -> Result<U256, TokenError> {
    let digits = input.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TokenError::InvalidAmount(input.to_string()));
    }
    U256::from_str_radix(digits, 10).map_err(|_| TokenError::InvalidAmount(input.to_string()))
}
