//! Network identifier.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::EncodingError;

/// Identifies which ledger network the client talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// The production network.
    Mainnet,
    /// The public test network.
    Ropsten,
    /// Local development chain shipped with the SDK.
    Sdk,
}

impl NetworkId {
    /// EIP-155 chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Ropsten => 3,
            Self::Sdk => 1337,
        }
    }

    /// Default JSON-RPC endpoint.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://mainnet.infura.io",
            Self::Ropsten => "https://ropsten.infura.io",
            Self::Sdk => "http://127.0.0.1:8545",
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Ropsten => "ropsten",
            Self::Sdk => "sdk",
        }
    }
}

impl FromStr for NetworkId {
    type Err = EncodingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "ropsten" | "test" => Ok(Self::Ropsten),
            "sdk" | "local" | "dev" => Ok(Self::Sdk),
            other => Err(EncodingError::KindMismatch {
                kind: "network",
                detail: format!("unknown network {other:?}"),
            }),
        }
    }
}
