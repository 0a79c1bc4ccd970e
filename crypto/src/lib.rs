//! Cryptographic primitives for fairroll.
//!
//! - **Keccak-256** over Solidity packed encoding for digests (`soliditySha3`)
//! - **secp256k1** recoverable ECDSA for signing digests and recovering signers
//! - Address derivation and EIP-55 mixed-case checksums

pub mod abi;
pub mod address;
pub mod error;
pub mod hash;
pub mod identity;
pub mod keys;
pub mod sign;

pub use abi::{decode_uint_word, encode_call, encode_packed, function_selector};
pub use address::{to_checksum, validate_checksum};
pub use error::CryptoError;
pub use hash::{hash_message, keccak256, keccak256_multi, solidity_sha3};
pub use identity::{Identity, LocalIdentity};
pub use keys::{address_from_private, generate_private_key};
pub use sign::{check_signature, recover, sign_hash};
