//! Typed values fed to the digest function.
//!
//! Each value carries its declared Solidity kind and a loosely-shaped raw
//! value, mirroring the `{ t, v }` objects accepted by ledger tooling. The
//! shape is only checked against the kind when the value is encoded, so a
//! mismatch surfaces as an [`EncodingError`] at hash time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::hash::decode_hex;
use crate::{Address, EncodingError, Uint, H256};

/// Supported Solidity kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolidityType {
    Bytes32,
    Address,
    #[serde(alias = "uint")]
    Uint256,
    Bytes,
    Bool,
}

impl SolidityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bytes32 => "bytes32",
            Self::Address => "address",
            Self::Uint256 => "uint256",
            Self::Bytes => "bytes",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for SolidityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolidityType {
    type Err = EncodingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bytes32" => Ok(Self::Bytes32),
            "address" => Ok(Self::Address),
            "uint" | "uint256" => Ok(Self::Uint256),
            "bytes" => Ok(Self::Bytes),
            "bool" => Ok(Self::Bool),
            other => Err(EncodingError::KindMismatch {
                kind: "type",
                detail: format!("unsupported solidity type {other:?}"),
            }),
        }
    }
}

/// The runtime shape of a value before it is checked against its kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Number(u64),
    /// `0x`-hex for byte kinds; `0x`-hex or decimal for `uint`.
    Text(String),
    Bytes(Vec<u8>),
}

impl RawValue {
    /// Byte content for the byte-like kinds (`bytes32`, `address`, `bytes`).
    pub fn to_bytes(&self, kind: SolidityType) -> Result<Vec<u8>, EncodingError> {
        match self {
            Self::Bytes(b) => Ok(b.clone()),
            Self::Text(s) if s.starts_with("0x") || s.starts_with("0X") => decode_hex(s),
            other => Err(EncodingError::KindMismatch {
                kind: kind.as_str(),
                detail: format!("expected bytes or 0x-hex, got {other:?}"),
            }),
        }
    }

    /// Integer content for `uint`.
    pub fn to_uint(&self) -> Result<Uint, EncodingError> {
        match self {
            Self::Number(n) => Ok(Uint::from(*n)),
            Self::Text(s) => Uint::parse(s),
            other => Err(EncodingError::KindMismatch {
                kind: SolidityType::Uint256.as_str(),
                detail: format!("expected integer, got {other:?}"),
            }),
        }
    }

    /// Boolean content for `bool`.
    pub fn to_bool(&self) -> Result<bool, EncodingError> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(EncodingError::KindMismatch {
                kind: SolidityType::Bool.as_str(),
                detail: format!("expected boolean, got {other:?}"),
            }),
        }
    }
}

/// A value tagged with the Solidity kind it is encoded as.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedValue {
    #[serde(rename = "t")]
    pub kind: SolidityType,
    #[serde(rename = "v")]
    pub value: RawValue,
}

impl TypedValue {
    pub fn new(kind: SolidityType, value: RawValue) -> Self {
        Self { kind, value }
    }

    pub fn bytes32(value: impl AsRef<[u8]>) -> Self {
        Self::new(SolidityType::Bytes32, RawValue::Bytes(value.as_ref().to_vec()))
    }

    pub fn digest(value: &H256) -> Self {
        Self::bytes32(value.as_bytes())
    }

    pub fn address(value: &Address) -> Self {
        Self::new(SolidityType::Address, RawValue::Bytes(value.as_bytes().to_vec()))
    }

    pub fn uint(value: impl Into<Uint>) -> Self {
        Self::new(SolidityType::Uint256, RawValue::Text(value.into().to_string()))
    }

    pub fn bytes(value: impl Into<Vec<u8>>) -> Self {
        Self::new(SolidityType::Bytes, RawValue::Bytes(value.into()))
    }

    pub fn bool(value: bool) -> Self {
        Self::new(SolidityType::Bool, RawValue::Bool(value))
    }
}

/// Parses `kind:value`, e.g. `uint:234`, `bytes32:0x00..01` or `bool:true`.
impl FromStr for TypedValue {
    type Err = EncodingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s.split_once(':').ok_or_else(|| EncodingError::KindMismatch {
            kind: "typed value",
            detail: format!("expected kind:value, got {s:?}"),
        })?;
        let kind: SolidityType = kind.parse()?;
        let value = value.trim();
        let raw = match kind {
            SolidityType::Bool => match value {
                "true" | "1" => RawValue::Bool(true),
                "false" | "0" => RawValue::Bool(false),
                other => {
                    return Err(EncodingError::KindMismatch {
                        kind: kind.as_str(),
                        detail: format!("expected true or false, got {other:?}"),
                    })
                }
            },
            _ => RawValue::Text(value.to_string()),
        };
        Ok(Self::new(kind, raw))
    }
}
