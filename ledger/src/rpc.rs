//! Ethereum JSON-RPC over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use fairroll_types::hash::decode_hex;
use fairroll_types::{Address, TxHash, Uint};
use fairroll_utils::{add_0x, ZERO_X};

use crate::{LedgerClient, LedgerError, TxReceipt, TxRequest};

/// HTTP client for an Ethereum JSON-RPC node.
///
/// Transactions are sent with `eth_sendTransaction`, so the `from` account
/// must be unlocked on the node.
pub struct JsonRpcLedger {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcReceipt {
    transaction_hash: String,
    block_number: Option<String>,
    status: Option<String>,
    gas_used: String,
}

impl JsonRpcLedger {
    /// Create a client targeting `url` (e.g. `http://127.0.0.1:8545`).
    pub fn new(url: impl Into<String>) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LedgerError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// The configured endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send a JSON-RPC request and decode its `result`.
    async fn rpc_call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, LedgerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(method, id, "rpc request");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(format!("{method}: request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(LedgerError::Transport(format!(
                "{method}: node returned HTTP {}",
                response.status()
            )));
        }

        let response: RpcResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::Malformed(format!("{method}: invalid JSON response: {e}")))?;

        if let Some(err) = response.error {
            return Err(LedgerError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        serde_json::from_value(response.result.unwrap_or(Value::Null))
            .map_err(|e| LedgerError::Malformed(format!("{method}: unexpected result: {e}")))
    }
}

/// `0x`-prefixed minimal hex quantity.
fn quantity(value: &Uint) -> String {
    value.to_hex()
}

fn parse_quantity(field: &str, s: &str) -> Result<Uint, LedgerError> {
    Uint::from_hex(s).map_err(|e| LedgerError::Malformed(format!("{field}: {e}")))
}

fn parse_u64(field: &str, s: &str) -> Result<u64, LedgerError> {
    parse_quantity(field, s)?
        .to_u64()
        .ok_or_else(|| LedgerError::Malformed(format!("{field}: {s} does not fit in u64")))
}

fn tx_object(request: &TxRequest) -> Value {
    let mut tx = json!({
        "from": request.from.to_hex(),
        "to": request.to.to_hex(),
        "value": quantity(&request.value),
        "data": add_0x(&hex::encode(&request.data)),
    });
    if let Some(limit) = request.gas_limit {
        tx["gas"] = json!(format!("{limit:#x}"));
    }
    if let Some(price) = &request.gas_price {
        tx["gasPrice"] = json!(quantity(price));
    }
    tx
}

impl TryFrom<RpcReceipt> for TxReceipt {
    type Error = LedgerError;

    fn try_from(raw: RpcReceipt) -> Result<Self, Self::Error> {
        let block = raw
            .block_number
            .ok_or_else(|| LedgerError::Malformed("receipt without blockNumber".into()))?;
        // Pre-Byzantium receipts carry no status; treat them as successful.
        let status = match raw.status.as_deref() {
            None => true,
            Some(s) => !parse_quantity("status", s)?.is_zero(),
        };
        Ok(TxReceipt {
            tx_hash: TxHash::from_hex(&raw.transaction_hash)?,
            block_number: parse_u64("blockNumber", &block)?,
            status,
            gas_used: parse_u64("gasUsed", &raw.gas_used)?,
        })
    }
}

impl LedgerClient for JsonRpcLedger {
    async fn balance(&self, address: &Address) -> Result<Uint, LedgerError> {
        let raw: String = self
            .rpc_call("eth_getBalance", json!([address.to_hex(), "latest"]))
            .await?;
        parse_quantity("balance", &raw)
    }

    async fn call(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, LedgerError> {
        let raw: String = self
            .rpc_call(
                "eth_call",
                json!([{ "to": to.to_hex(), "data": add_0x(&hex::encode(data)) }, "latest"]),
            )
            .await?;
        if raw == ZERO_X {
            return Ok(Vec::new());
        }
        Ok(decode_hex(&raw)?)
    }

    async fn send_transaction(&self, request: &TxRequest) -> Result<TxHash, LedgerError> {
        let raw: String = self
            .rpc_call("eth_sendTransaction", json!([tx_object(request)]))
            .await?;
        let tx = TxHash::from_hex(&raw)?;
        info!(%tx, from = %request.from, to = %request.to, "transaction submitted");
        Ok(tx)
    }

    async fn receipt(&self, tx: &TxHash) -> Result<Option<TxReceipt>, LedgerError> {
        let raw: Option<RpcReceipt> = self
            .rpc_call("eth_getTransactionReceipt", json!([tx.to_hex()]))
            .await?;
        match raw {
            // Some nodes return a receipt with a null block while the tx is pending.
            Some(r) if r.block_number.is_none() => Ok(None),
            Some(r) => Ok(Some(r.try_into()?)),
            None => Ok(None),
        }
    }

    async fn block_number(&self) -> Result<u64, LedgerError> {
        let raw: String = self.rpc_call("eth_blockNumber", json!([])).await?;
        parse_u64("blockNumber", &raw)
    }
}
