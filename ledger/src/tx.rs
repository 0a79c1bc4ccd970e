//! Transaction requests and receipts.

use fairroll_types::{Address, TxHash, Uint};
use serde::{Deserialize, Serialize};

use crate::GasConfig;

/// A transaction to be signed and sent by the ledger-managed `from` account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxRequest {
    pub from: Address,
    pub to: Address,
    /// Wei attached to the call.
    pub value: Uint,
    pub data: Vec<u8>,
    pub gas_limit: Option<u64>,
    pub gas_price: Option<Uint>,
}

impl TxRequest {
    /// A contract call carrying no value.
    pub fn call(from: Address, to: Address, data: Vec<u8>) -> Self {
        Self {
            from,
            to,
            value: Uint::zero(),
            data,
            gas_limit: None,
            gas_price: None,
        }
    }

    /// Set the gas limit and price from `gas`.
    pub fn with_gas(mut self, gas: &GasConfig) -> Self {
        self.gas_limit = Some(gas.limit);
        self.gas_price = Some(gas.price.clone());
        self
    }
}

/// The outcome of a mined transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
    /// `false` if execution reverted.
    pub status: bool,
    pub gas_used: u64,
}
