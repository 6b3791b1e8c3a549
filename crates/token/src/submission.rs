//! Submission order for batch transfers.
//!
//! A policy decides how the transfers of a batch reach the wallet. The batch
//! contract stays the same whatever the policy: receipts come back in request
//! order, and a failure reports its index and the receipts already obtained.

use crate::{TokenClient, TokenError, TransferRequest};
use std::future::Future;
use tracing::{debug, error};
use wallet::{Receipt, Wallet};

pub trait SubmissionPolicy: Send + Sync {
    /// Submit `requests` through `client`.
    fn submit<W: Wallet>(
        &self,
        client: &TokenClient<W>,
        requests: &[TransferRequest],
    ) -> impl Future<Output = Result<Vec<Receipt>, TokenError>> + Send;
}

/// One transfer at a time, in list order, each awaited before the next.
///
/// Concurrent sends from one account race for nonces in the wallet, so this is
/// the default. If transfer `i` fails, `0..i` stay confirmed (ledger
/// transactions cannot be undone) and `i + 1..` are never submitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl SubmissionPolicy for Sequential {
    async fn submit<W: Wallet>(
        &self,
        client: &TokenClient<W>,
        requests: &[TransferRequest],
    ) -> Result<Vec<Receipt>, TokenError> {
        let mut completed = Vec::with_capacity(requests.len());

        for (index, request) in requests.iter().enumerate() {
            match client.transfer(request.recipient, request.amount).await {
                Ok(receipt) => {
                    debug!(index, tx_hash = %receipt.tx_hash, "Batch entry confirmed");
                    completed.push(receipt);
                }
                Err(source) => {
                    error!(
                        index,
                        confirmed = completed.len(),
                        error = %source,
                        "Batch transfer aborted"
                    );
                    return Err(TokenError::BatchTransferPartiallyFailed {
                        index,
                        completed,
                        source: Box::new(source),
                    });
                }
            }
        }

        Ok(completed)
    }
}
