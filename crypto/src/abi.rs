//! Solidity ABI encodings: packed encoding for hashing and static call data.

use fairroll_types::{EncodingError, SolidityType, TypedValue, Uint};

use crate::hash::keccak256;

/// Packed encoding (`abi.encodePacked`) of a value list.
///
/// | kind       | bytes                              |
/// |------------|------------------------------------|
/// | `bytes32`  | exactly 32                         |
/// | `address`  | exactly 20                         |
/// | `uint256`  | 32, big-endian, at most 2^256 - 1  |
/// | `bytes`    | raw, no length prefix              |
/// | `bool`     | 1                                  |
pub fn encode_packed(values: &[TypedValue]) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(values.len() * 32);
    for value in values {
        encode_one(value, &mut out)?;
    }
    Ok(out)
}

fn encode_one(value: &TypedValue, out: &mut Vec<u8>) -> Result<(), EncodingError> {
    match value.kind {
        SolidityType::Bytes32 => {
            let bytes = value.value.to_bytes(value.kind)?;
            expect_len(&bytes, 32, value.kind)?;
            out.extend_from_slice(&bytes);
        }
        SolidityType::Address => {
            let bytes = value.value.to_bytes(value.kind)?;
            expect_len(&bytes, 20, value.kind)?;
            out.extend_from_slice(&bytes);
        }
        SolidityType::Uint256 => {
            out.extend_from_slice(&value.value.to_uint()?.to_be_bytes32()?);
        }
        SolidityType::Bytes => {
            out.extend_from_slice(&value.value.to_bytes(value.kind)?);
        }
        SolidityType::Bool => {
            out.push(u8::from(value.value.to_bool()?));
        }
    }
    Ok(())
}

fn expect_len(bytes: &[u8], expected: usize, kind: SolidityType) -> Result<(), EncodingError> {
    if bytes.len() != expected {
        return Err(EncodingError::InvalidLength {
            kind: kind.as_str(),
            expected,
            got: bytes.len(),
        });
    }
    Ok(())
}

/// First four bytes of the Keccak-256 hash of a function signature,
/// e.g. `"approve(address,uint256)"`.
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Call data for a function whose arguments are all static 32-byte words.
pub fn encode_call(signature: &str, words: &[[u8; 32]]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + 32 * words.len());
    data.extend_from_slice(&function_selector(signature));
    for word in words {
        data.extend_from_slice(word);
    }
    data
}

/// Decode a single returned `uint256` word.
pub fn decode_uint_word(data: &[u8]) -> Result<Uint, EncodingError> {
    if data.len() != 32 {
        return Err(EncodingError::InvalidLength {
            kind: "uint256",
            expected: 32,
            got: data.len(),
        });
    }
    Ok(Uint::from_be_bytes(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairroll_types::{Address, RawValue};

    #[test]
    fn packed_layout() {
        let addr = Address::new([0xAA; 20]);
        let packed = encode_packed(&[
            TypedValue::bytes32([1u8; 32]),
            TypedValue::address(&addr),
            TypedValue::uint(2u64),
            TypedValue::bytes(vec![9, 9]),
            TypedValue::bool(true),
        ])
        .unwrap();
        assert_eq!(packed.len(), 32 + 20 + 32 + 2 + 1);
        assert_eq!(&packed[..32], &[1u8; 32]);
        assert_eq!(&packed[32..52], &[0xAA; 20]);
        assert_eq!(packed[83], 2);
        assert_eq!(&packed[84..86], &[9, 9]);
        assert_eq!(packed[86], 1);
    }

    #[test]
    fn bytes32_must_be_exactly_32() {
        let err = encode_packed(&[TypedValue::bytes32([0u8; 31])]).unwrap_err();
        assert_eq!(
            err,
            EncodingError::InvalidLength {
                kind: "bytes32",
                expected: 32,
                got: 31
            }
        );
    }

    #[test]
    fn address_must_be_exactly_20() {
        let value = TypedValue::new(SolidityType::Address, RawValue::Bytes(vec![0u8; 32]));
        assert!(matches!(
            encode_packed(&[value]),
            Err(EncodingError::InvalidLength { kind: "address", .. })
        ));
    }

    #[test]
    fn uint_wider_than_256_bits_fails() {
        let too_wide = TypedValue::uint(Uint::pow2(256));
        assert!(matches!(
            encode_packed(&[too_wide]),
            Err(EncodingError::IntegerTooWide { bits: 256 })
        ));
    }

    #[test]
    fn kind_shape_mismatch_fails() {
        let value = TypedValue::new(SolidityType::Bool, RawValue::Bytes(vec![1]));
        assert!(matches!(
            encode_packed(&[value]),
            Err(EncodingError::KindMismatch { kind: "bool", .. })
        ));
        let value = TypedValue::new(SolidityType::Bytes32, RawValue::Bool(true));
        assert!(matches!(
            encode_packed(&[value]),
            Err(EncodingError::KindMismatch { kind: "bytes32", .. })
        ));
    }

    #[test]
    fn hex_text_values_are_decoded() {
        let value = TypedValue::new(
            SolidityType::Bytes32,
            RawValue::Text(format!("0x{}", "ff".repeat(32))),
        );
        assert_eq!(encode_packed(&[value]).unwrap(), vec![0xFF; 32]);
    }

    #[test]
    fn erc20_selectors() {
        assert_eq!(function_selector("approve(address,uint256)"), [0x09, 0x5e, 0xa7, 0xb3]);
        assert_eq!(function_selector("allowance(address,address)"), [0xdd, 0x62, 0xed, 0x3e]);
        assert_eq!(function_selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(function_selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn call_data_is_selector_plus_words() {
        let data = encode_call("balanceOf(address)", &[Address::new([7u8; 20]).to_word()]);
        assert_eq!(data.len(), 36);
        assert_eq!(&data[..4], &[0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(&data[16..], &[7u8; 20]);
    }

    #[test]
    fn decode_uint_word_checks_length() {
        let mut word = [0u8; 32];
        word[31] = 5;
        assert_eq!(decode_uint_word(&word).unwrap(), Uint::from(5u64));
        assert!(decode_uint_word(&word[1..]).is_err());
    }
}
