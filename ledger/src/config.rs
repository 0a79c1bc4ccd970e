//! Ledger configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use fairroll_types::{Address, NetworkId, Uint};
use fairroll_utils::LogFormat;

use crate::{ConfirmPolicy, LedgerError};

/// Gas parameters attached to every submitted transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasConfig {
    /// Gas price in wei.
    #[serde(default = "default_gas_price")]
    pub price: Uint,

    /// Gas limit per transaction.
    #[serde(default = "default_gas_limit")]
    pub limit: u64,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            price: default_gas_price(),
            limit: default_gas_limit(),
        }
    }
}

/// Configuration for talking to a ledger.
///
/// Can be loaded from a TOML file via [`LedgerConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Which network to connect to.
    #[serde(default = "default_network")]
    pub network: NetworkId,

    /// JSON-RPC endpoint. Falls back to the network's default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_provider_url: Option<String>,

    /// The ERC20 token used for bets and payouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub erc20_address: Option<Address>,

    /// Blocks (including the inclusion block) before a transaction counts as final.
    #[serde(default = "default_confirmations")]
    pub confirmations: u64,

    /// Receipt polling interval.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Give up waiting for confirmations after this long.
    #[serde(default = "default_confirmation_timeout_secs")]
    pub confirmation_timeout_secs: u64,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Serialized last: TOML tables must follow plain keys.
    #[serde(default)]
    pub gas: GasConfig,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_network() -> NetworkId {
    NetworkId::Sdk
}

fn default_gas_price() -> Uint {
    Uint::from(40_000_000_000u64)
}

fn default_gas_limit() -> u64 {
    150_000
}

fn default_confirmations() -> u64 {
    1
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

fn default_confirmation_timeout_secs() -> u64 {
    120
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl LedgerConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            LedgerError::Config(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, LedgerError> {
        toml::from_str(s).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, LedgerError> {
        toml::to_string_pretty(self).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// The JSON-RPC endpoint to use.
    pub fn rpc_url(&self) -> &str {
        self.http_provider_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url())
    }

    /// The configured token, or an error if none is set.
    pub fn token_address(&self) -> Result<Address, LedgerError> {
        self.erc20_address
            .ok_or(LedgerError::MissingAddress("erc20_address"))
    }

    pub fn confirm_policy(&self) -> ConfirmPolicy {
        ConfirmPolicy {
            confirmations: self.confirmations,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            timeout: Duration::from_secs(self.confirmation_timeout_secs),
        }
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            http_provider_url: None,
            erc20_address: None,
            confirmations: default_confirmations(),
            poll_interval_ms: default_poll_interval_ms(),
            confirmation_timeout_secs: default_confirmation_timeout_secs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            gas: GasConfig::default(),
        }
    }
}
