//! Fundamental types for fairroll.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! arbitrary-precision integers, 32-byte digests, ledger addresses, keys and
//! signatures, typed values for hashing, draw ranges, token amounts and network ids.

pub mod address;
pub mod amount;
pub mod error;
pub mod hash;
pub mod keys;
pub mod network;
pub mod range;
pub mod typed_value;
pub mod uint;

pub use address::Address;
pub use amount::TokenAmount;
pub use error::EncodingError;
pub use hash::{Seed, TxHash, H256};
pub use keys::{PrivateKey, Signature};
pub use network::NetworkId;
pub use range::{Draw, DrawBatch, RangeSpec};
pub use typed_value::{RawValue, SolidityType, TypedValue};
pub use uint::Uint;
