//! Key-holding identities.
//!
//! Anything that can sign a digest and name its own address can stand in for
//! the player or bankroller key: a local key, a hardware wallet, a remote
//! signer. Callers pass an identity explicitly; nothing holds a global account.

use fairroll_types::{Address, PrivateKey, Signature, H256};

use crate::keys::{address_from_private, generate_private_key};
use crate::sign::sign_hash;
use crate::CryptoError;

/// A signer with a stable address.
pub trait Identity: Send + Sync {
    /// The address that signatures from this identity recover to.
    fn address(&self) -> Address;

    /// Sign a 32-byte digest.
    fn sign_digest(&self, digest: &H256) -> Result<Signature, CryptoError>;
}

/// An identity backed by an in-memory private key.
pub struct LocalIdentity {
    key: PrivateKey,
    address: Address,
}

impl LocalIdentity {
    pub fn new(key: PrivateKey) -> Result<Self, CryptoError> {
        let address = address_from_private(&key)?;
        Ok(Self { key, address })
    }

    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        Self::new(PrivateKey::from_hex(s)?)
    }

    /// A fresh random identity.
    pub fn generate() -> Result<Self, CryptoError> {
        Self::new(generate_private_key()?)
    }
}

impl Identity for LocalIdentity {
    fn address(&self) -> Address {
        self.address
    }

    fn sign_digest(&self, digest: &H256) -> Result<Signature, CryptoError> {
        sign_hash(digest, &self.key)
    }
}

impl std::fmt::Debug for LocalIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalIdentity")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
