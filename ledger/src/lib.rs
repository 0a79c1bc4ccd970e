//! Ledger access for settling rounds.
//!
//! [`LedgerClient`] is the seam between game logic and an Ethereum-style
//! ledger: native balances, read-only contract calls, transaction submission
//! and receipts. [`JsonRpcLedger`] speaks JSON-RPC over HTTP; tests swap in
//! the in-memory ledger from `fairroll-nullables`.
//!
//! On top of the trait sit the ERC20 helper ([`Erc20`]), the confirmation
//! waiter ([`wait_for_confirmations`]) and balance snapshots ([`get_balances`]).
//! Nothing here caches state between calls; callers pass the ledger, the
//! token address and the sending account explicitly.

pub mod balances;
pub mod config;
pub mod confirm;
pub mod erc20;
pub mod error;
pub mod rpc;
pub mod tx;

use std::future::Future;

use fairroll_types::{Address, TxHash, Uint};

pub use balances::{get_balances, get_bet_balance, get_eth_balance, Balance, Balances};
pub use config::{GasConfig, LedgerConfig};
pub use confirm::{wait_for_confirmations, ConfirmPolicy};
pub use erc20::Erc20;
pub use error::LedgerError;
pub use rpc::JsonRpcLedger;
pub use tx::{TxReceipt, TxRequest};

/// An Ethereum-style ledger.
pub trait LedgerClient: Send + Sync {
    /// Native balance of `address` in wei.
    fn balance(&self, address: &Address) -> impl Future<Output = Result<Uint, LedgerError>> + Send;

    /// Execute a read-only call against the latest block and return the raw
    /// return data.
    fn call(
        &self,
        to: &Address,
        data: &[u8],
    ) -> impl Future<Output = Result<Vec<u8>, LedgerError>> + Send;

    /// Submit a transaction from a ledger-managed account.
    fn send_transaction(
        &self,
        request: &TxRequest,
    ) -> impl Future<Output = Result<TxHash, LedgerError>> + Send;

    /// The receipt of `tx`, or `None` while it is pending.
    fn receipt(
        &self,
        tx: &TxHash,
    ) -> impl Future<Output = Result<Option<TxReceipt>, LedgerError>> + Send;

    /// Height of the latest block.
    fn block_number(&self) -> impl Future<Output = Result<u64, LedgerError>> + Send;
}
