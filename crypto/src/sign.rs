//! Recoverable ECDSA signing of digests and signer recovery.
//!
//! Digests are signed as-is, with no message prefix. Callers that want
//! personal-message semantics hash with [`crate::hash_message`] first.

use fairroll_types::{Address, PrivateKey, Signature, H256};
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};

use crate::keys::{address_from_public, signing_key};
use crate::CryptoError;

/// Offset added to the recovery id in the trailing `v` byte.
const V_OFFSET: u8 = 27;

/// Sign a 32-byte digest. Deterministic (RFC 6979) and low-S normalized.
pub fn sign_hash(digest: &H256, private_key: &PrivateKey) -> Result<Signature, CryptoError> {
    let key = signing_key(private_key)?;
    let (sig, recid) = key
        .sign_prehash_recoverable(digest.as_bytes())
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    let mut out = [0u8; 65];
    out[..64].copy_from_slice(&sig.to_bytes());
    out[64] = recid.to_byte() + V_OFFSET;
    Ok(Signature(out))
}

/// Recover the address that produced `signature` over `digest`.
///
/// Accepts `v` as `27/28` or raw `0/1`, and high-S signatures from signers
/// that do not normalize.
pub fn recover(digest: &H256, signature: &Signature) -> Result<Address, CryptoError> {
    let v = signature.v();
    let raw_recid = if v >= V_OFFSET { v - V_OFFSET } else { v };
    let mut recid = RecoveryId::from_byte(raw_recid)
        .filter(|id| !id.is_x_reduced())
        .ok_or_else(|| CryptoError::InvalidSignature(format!("bad recovery byte {v}")))?;

    let mut sig = EcdsaSignature::from_slice(&signature.as_bytes()[..64])
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    if let Some(normalized) = sig.normalize_s() {
        sig = normalized;
        recid = RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced());
    }

    let key = VerifyingKey::recover_from_prehash(digest.as_bytes(), &sig, recid)
        .map_err(|_| CryptoError::RecoveryFailed)?;
    Ok(address_from_public(&key))
}

/// Whether `signature` over `digest` was produced by `expected`.
pub fn check_signature(digest: &H256, signature: &Signature, expected: &Address) -> bool {
    recover(digest, signature).is_ok_and(|signer| signer == *expected)
}
