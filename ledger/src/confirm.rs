//! Waiting for a submitted transaction to reach a confirmation depth.

use std::time::Duration;

use fairroll_types::TxHash;
use fairroll_utils::format_elapsed;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::{LedgerClient, LedgerError, TxReceipt};

/// How long and how often to poll for a receipt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmPolicy {
    /// Blocks counted from the inclusion block itself. `0` behaves like `1`.
    pub confirmations: u64,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for ConfirmPolicy {
    fn default() -> Self {
        Self {
            confirmations: 1,
            poll_interval: Duration::from_secs(1),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Poll until `tx` is mined successfully and buried under enough blocks.
///
/// Fails with [`LedgerError::Reverted`] as soon as a failed receipt appears
/// and with [`LedgerError::Timeout`] once `policy.timeout` has elapsed.
pub async fn wait_for_confirmations<L: LedgerClient>(
    ledger: &L,
    tx: &TxHash,
    policy: &ConfirmPolicy,
) -> Result<TxReceipt, LedgerError> {
    let started = Instant::now();
    let needed = policy.confirmations.max(1);

    loop {
        if let Some(receipt) = ledger.receipt(tx).await? {
            if !receipt.status {
                return Err(LedgerError::Reverted { tx: *tx });
            }
            let head = ledger.block_number().await?;
            let depth = (head + 1).saturating_sub(receipt.block_number);
            if depth >= needed {
                let elapsed = started.elapsed().as_millis() as u64;
                info!(%tx, block = receipt.block_number, depth, elapsed = %format_elapsed(elapsed), "transaction confirmed");
                return Ok(receipt);
            }
            debug!(%tx, depth, needed, "waiting for confirmations");
        }

        let waited = started.elapsed();
        if waited >= policy.timeout {
            return Err(LedgerError::Timeout {
                tx: *tx,
                waited_ms: waited.as_millis() as u64,
            });
        }
        tokio::time::sleep(policy.poll_interval.min(policy.timeout - waited)).await;
    }
}
