//! Fixed 32-byte values: digests, seeds and transaction hashes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::{EncodingError, Uint};

/// Decode `0x`-prefixed (or bare) hex into exactly `N` bytes.
pub(crate) fn decode_hex_fixed<const N: usize>(
    s: &str,
    kind: &'static str,
) -> Result<[u8; N], EncodingError> {
    let bytes = decode_hex(s)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| EncodingError::InvalidLength {
            kind,
            expected: N,
            got: bytes.len(),
        })
}

/// Decode `0x`-prefixed (or bare) hex of any even length.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, EncodingError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(digits).map_err(|e| EncodingError::InvalidHex(format!("{s}: {e}")))
}

macro_rules! fixed_bytes32 {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; 32]);

        impl $name {
            pub const ZERO: Self = Self([0u8; 32]);

            pub fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Copy from a slice that must be exactly 32 bytes long.
            pub fn from_slice(bytes: &[u8]) -> Result<Self, EncodingError> {
                bytes
                    .try_into()
                    .map(Self)
                    .map_err(|_| EncodingError::InvalidLength {
                        kind: $kind,
                        expected: 32,
                        got: bytes.len(),
                    })
            }

            pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
                decode_hex_fixed::<32>(s, $kind).map(Self)
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                format!("0x{}", hex::encode(self.0))
            }

            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }

            /// Big-endian integer value of the 32 bytes.
            pub fn to_uint(&self) -> Uint {
                Uint::from_be_bytes(&self.0)
            }

            /// Inverse of [`Self::to_uint`]; fails above 2^256 - 1.
            pub fn from_uint(value: &Uint) -> Result<Self, EncodingError> {
                value.to_be_bytes32().map(Self)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }

        impl FromStr for $name {
            type Err = EncodingError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(&self.0[..4]))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes32!(
    /// A 32-byte Keccak-256 digest.
    H256,
    "bytes32"
);

fixed_bytes32!(
    /// A per-round seed. Must be unpredictable until the player commits.
    Seed,
    "seed"
);

fixed_bytes32!(
    /// Hash of a submitted ledger transaction.
    TxHash,
    "tx hash"
);

impl From<Seed> for H256 {
    fn from(seed: Seed) -> Self {
        H256(seed.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip_with_prefix() {
        let h = H256::new([0xAB; 32]);
        let s = h.to_hex();
        assert!(s.starts_with("0xabab"));
        assert_eq!(H256::from_hex(&s).unwrap(), h);
        assert_eq!(H256::from_hex(&s[2..]).unwrap(), h);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = H256::from_hex("0x1234").unwrap_err();
        assert_eq!(
            err,
            EncodingError::InvalidLength {
                kind: "bytes32",
                expected: 32,
                got: 2
            }
        );
        assert!(H256::from_slice(&[0u8; 33]).is_err());
    }

    #[test]
    fn uint_conversion_is_big_endian() {
        let mut bytes = [0u8; 32];
        bytes[31] = 7;
        let h = H256::new(bytes);
        assert_eq!(h.to_uint(), Uint::from(7u64));
        assert_eq!(H256::from_uint(&Uint::from(7u64)).unwrap(), h);
    }

    #[test]
    fn seed_converts_to_digest() {
        let seed = Seed::new([9u8; 32]);
        let h: H256 = seed.into();
        assert_eq!(h.as_bytes(), seed.as_bytes());
    }

    #[test]
    fn debug_is_abbreviated() {
        let h = TxHash::new([0x12; 32]);
        assert_eq!(format!("{h:?}"), "TxHash(12121212)");
    }
}
