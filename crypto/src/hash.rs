//! Keccak-256 hashing.

use fairroll_types::{EncodingError, TypedValue, H256};
use sha3::{Digest, Keccak256};

use crate::abi::encode_packed;

/// Compute the Keccak-256 hash of arbitrary data.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn keccak256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Digest of typed values: Keccak-256 over their packed encoding.
///
/// Matches Solidity's `keccak256(abi.encodePacked(...))`, so a contract can
/// recompute any digest produced here.
pub fn solidity_sha3(values: &[TypedValue]) -> Result<H256, EncodingError> {
    let packed = encode_packed(values)?;
    Ok(H256::new(keccak256(&packed)))
}

/// Digest of a personal message with the `\x19Ethereum Signed Message:\n<len>` prefix.
pub fn hash_message(message: &[u8]) -> H256 {
    let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
    H256::new(keccak256_multi(&[prefix.as_bytes(), message]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairroll_types::{Address, Uint};

    fn h(s: &str) -> H256 {
        H256::from_hex(s).unwrap()
    }

    #[test]
    fn keccak_empty_vector() {
        assert_eq!(
            H256::new(keccak256(b"")),
            h("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
    }

    #[test]
    fn keccak_multi_equivalent() {
        assert_eq!(keccak256(b"helloworld"), keccak256_multi(&[b"hello", b"world"]));
    }

    #[test]
    fn uint_vector() {
        let digest = solidity_sha3(&[TypedValue::uint(234u64)]).unwrap();
        assert_eq!(
            digest,
            h("61c831beab28d67d1bb40b5ae1a11e2757fa842f031a2d0bc94a7867bc5d26c2")
        );
    }

    #[test]
    fn bool_vector() {
        let digest = solidity_sha3(&[TypedValue::bool(true)]).unwrap();
        assert_eq!(
            digest,
            h("5fe7f977e71dba2ea1a68e21057beebb9be2ac30c6410aa38d4f3fbe41dcffd2")
        );
    }

    #[test]
    fn address_and_uint_vector() {
        let addr = Address::from_hex("0x7e5f4552091a69125d5dfcb7b8c2659029395bdf").unwrap();
        let digest = solidity_sha3(&[TypedValue::address(&addr), TypedValue::uint(7u64)]).unwrap();
        assert_eq!(
            digest,
            h("5ea6badac3c0614dfd4569adfd5aa0e858095ce8fc639cc0f2c2af6612266b7a")
        );
    }

    #[test]
    fn bytes_and_bool_vector() {
        let digest =
            solidity_sha3(&[TypedValue::bytes(b"hello".to_vec()), TypedValue::bool(false)]).unwrap();
        assert_eq!(
            digest,
            h("a303d084c31a55bce115c4ca365894d58e175e226d996a69a791ebe912278f69")
        );
    }

    #[test]
    fn bytes32_vector() {
        let digest = solidity_sha3(&[TypedValue::bytes32([0x11u8; 32])]).unwrap();
        assert_eq!(
            digest,
            h("b569321de72d0af89c2fb48a484de3fc9343f31600ae1f3e13d633cb48cbf816")
        );
    }

    #[test]
    fn deterministic() {
        let values = [TypedValue::uint(Uint::pow2(200)), TypedValue::bool(true)];
        assert_eq!(solidity_sha3(&values).unwrap(), solidity_sha3(&values).unwrap());
    }

    #[test]
    fn personal_message_vector() {
        assert_eq!(
            hash_message(b"hello"),
            h("50b2c43fd39106bafbba0da34fc430e1f91e3c96ea2acee2bc34119f92b37750")
        );
    }
}
