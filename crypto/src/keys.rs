//! secp256k1 key generation and address derivation.

use fairroll_types::{Address, PrivateKey};
use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::hash::keccak256;
use crate::CryptoError;

/// Generate a new private key from the OS random source.
pub fn generate_private_key() -> Result<PrivateKey, CryptoError> {
    loop {
        let mut bytes = [0u8; 32];
        getrandom::getrandom(&mut bytes).map_err(|e| CryptoError::Entropy(e.to_string()))?;
        // Zero and values >= the group order are not valid scalars; redraw.
        if SigningKey::from_slice(&bytes).is_ok() {
            return Ok(PrivateKey(bytes));
        }
    }
}

pub(crate) fn signing_key(private: &PrivateKey) -> Result<SigningKey, CryptoError> {
    SigningKey::from_slice(private.as_bytes()).map_err(|_| CryptoError::InvalidPrivateKey)
}

/// Address of a public key: last 20 bytes of Keccak-256 over the
/// uncompressed point without its `0x04` tag.
pub fn address_from_public(public: &VerifyingKey) -> Address {
    let point = public.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    Address::new(out)
}

/// Derive the address controlled by a private key.
pub fn address_from_private(private: &PrivateKey) -> Result<Address, CryptoError> {
    Ok(address_from_public(signing_key(private)?.verifying_key()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_from_u8(last: u8) -> PrivateKey {
        let mut bytes = [0u8; 32];
        bytes[31] = last;
        PrivateKey(bytes)
    }

    #[test]
    fn known_address_for_key_one() {
        let addr = address_from_private(&key_from_u8(1)).unwrap();
        assert_eq!(
            addr,
            Address::from_hex("0x7e5f4552091a69125d5dfcb7b8c2659029395bdf").unwrap()
        );
    }

    #[test]
    fn known_address_for_key_two() {
        let addr = address_from_private(&key_from_u8(2)).unwrap();
        assert_eq!(
            addr,
            Address::from_hex("0x2b5ad5c4795c026514f8317c7a215e218dccd6cf").unwrap()
        );
    }

    #[test]
    fn zero_key_is_invalid() {
        assert!(matches!(
            address_from_private(&PrivateKey([0u8; 32])),
            Err(CryptoError::InvalidPrivateKey)
        ));
    }

    #[test]
    fn key_above_group_order_is_invalid() {
        assert!(address_from_private(&PrivateKey([0xFF; 32])).is_err());
    }

    #[test]
    fn generated_keys_are_valid_and_distinct() {
        let a = generate_private_key().unwrap();
        let b = generate_private_key().unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
        assert!(address_from_private(&a).is_ok());
    }
}
