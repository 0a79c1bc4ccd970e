//! Arbitrary-precision unsigned integers.
//!
//! Draw arithmetic runs on values close to 2^256, so nothing here is backed
//! by a native fixed-width integer. [`Uint`] wraps [`num_bigint::BigUint`] and
//! adds the hex/decimal parsing and 32-byte big-endian conversions the rest of
//! the workspace needs.

use num_bigint::BigUint;
use num_traits::{Num, One, ToPrimitive, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Div, Mul, Rem, Sub};
use std::str::FromStr;

use crate::EncodingError;

/// An exact unsigned integer of unbounded width.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uint(BigUint);

impl Uint {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn one() -> Self {
        Self(BigUint::one())
    }

    /// `2^exp`.
    pub fn pow2(exp: u32) -> Self {
        Self(BigUint::one() << exp)
    }

    /// `2^256 - 1`, the largest value a `uint256` word can hold.
    pub fn max_u256() -> Self {
        Self((BigUint::one() << 256u32) - 1u32)
    }

    /// Interpret big-endian bytes of any length.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        Self(BigUint::from_bytes_be(bytes))
    }

    /// Render as a 32-byte big-endian word, left-padded with zeros.
    pub fn to_be_bytes32(&self) -> Result<[u8; 32], EncodingError> {
        if self.0.bits() > 256 {
            return Err(EncodingError::IntegerTooWide { bits: 256 });
        }
        let raw = self.0.to_bytes_be();
        let mut out = [0u8; 32];
        // `to_bytes_be` yields a single 0x00 for zero.
        if !self.0.is_zero() {
            out[32 - raw.len()..].copy_from_slice(&raw);
        }
        Ok(out)
    }

    /// Parse a hex string with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() {
            return Err(EncodingError::InvalidHex(s.to_string()));
        }
        BigUint::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| EncodingError::InvalidHex(s.to_string()))
    }

    /// Parse a base-10 string.
    pub fn from_dec_str(s: &str) -> Result<Self, EncodingError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EncodingError::InvalidInteger(s.to_string()));
        }
        BigUint::from_str_radix(s, 10)
            .map(Self)
            .map_err(|_| EncodingError::InvalidInteger(s.to_string()))
    }

    /// Parse `0x`-prefixed hex or plain decimal.
    pub fn parse(s: &str) -> Result<Self, EncodingError> {
        let s = s.trim();
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex(s)
        } else {
            Self::from_dec_str(s)
        }
    }

    /// Minimal `0x`-prefixed lowercase hex (`0x0` for zero).
    pub fn to_hex(&self) -> String {
        format!("0x{}", self.0.to_str_radix(16))
    }

    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    pub fn to_u128(&self) -> Option<u128> {
        self.0.to_u128()
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        if other.0 > self.0 {
            None
        } else {
            Some(Self(&self.0 - &other.0))
        }
    }

    /// `self mod modulus`, or `None` when the modulus is zero.
    pub fn checked_rem(&self, modulus: &Self) -> Option<Self> {
        if modulus.is_zero() {
            None
        } else {
            Some(Self(&self.0 % &modulus.0))
        }
    }

    pub fn checked_div(&self, divisor: &Self) -> Option<Self> {
        if divisor.is_zero() {
            None
        } else {
            Some(Self(&self.0 / &divisor.0))
        }
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

macro_rules! impl_binop {
    ($trait:ident, $method:ident) => {
        impl $trait<&Uint> for &Uint {
            type Output = Uint;
            fn $method(self, rhs: &Uint) -> Uint {
                Uint($trait::$method(&self.0, &rhs.0))
            }
        }

        impl $trait<Uint> for Uint {
            type Output = Uint;
            fn $method(self, rhs: Uint) -> Uint {
                Uint($trait::$method(self.0, rhs.0))
            }
        }

        impl $trait<u64> for &Uint {
            type Output = Uint;
            fn $method(self, rhs: u64) -> Uint {
                Uint($trait::$method(&self.0, rhs))
            }
        }
    };
}

// Sub, Div and Rem panic like their `BigUint` counterparts; use the
// `checked_*` methods where the operands are not already validated.
impl_binop!(Add, add);
impl_binop!(Sub, sub);
impl_binop!(Mul, mul);
impl_binop!(Div, div);
impl_binop!(Rem, rem);

impl From<u64> for Uint {
    fn from(v: u64) -> Self {
        Self(BigUint::from(v))
    }
}

impl From<u128> for Uint {
    fn from(v: u128) -> Self {
        Self(BigUint::from(v))
    }
}

impl From<u32> for Uint {
    fn from(v: u32) -> Self {
        Self(BigUint::from(v))
    }
}

impl From<usize> for Uint {
    fn from(v: usize) -> Self {
        Self(BigUint::from(v))
    }
}

impl From<BigUint> for Uint {
    fn from(v: BigUint) -> Self {
        Self(v)
    }
}

impl FromStr for Uint {
    type Err = EncodingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Uint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Uint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uint({})", self.to_hex())
    }
}

/// Serialized as a decimal string so values above 2^53 survive JSON readers.
impl Serialize for Uint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Uint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct UintVisitor;

        impl serde::de::Visitor<'_> for UintVisitor {
            type Value = Uint;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "an unsigned integer or a decimal/0x-hex string")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(Uint::from(v))
            }

            // TOML integers arrive as i64.
            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map(Uint::from)
                    .map_err(|_| E::custom(format!("negative integer {v}")))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Uint::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(UintVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_and_decimal_agree() {
        let a = Uint::parse("0xff").unwrap();
        let b = Uint::parse("255").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_hex(), "0xff");
        assert_eq!(b.to_string(), "255");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(Uint::parse("0x"), Err(EncodingError::InvalidHex(_))));
        assert!(matches!(Uint::parse("0xzz"), Err(EncodingError::InvalidHex(_))));
        assert!(matches!(Uint::parse("-5"), Err(EncodingError::InvalidInteger(_))));
        assert!(matches!(Uint::parse(""), Err(EncodingError::InvalidInteger(_))));
    }

    #[test]
    fn zero_renders_as_full_word() {
        assert_eq!(Uint::zero().to_be_bytes32().unwrap(), [0u8; 32]);
        assert_eq!(Uint::zero().to_hex(), "0x0");
    }

    #[test]
    fn be_bytes32_is_left_padded() {
        let bytes = Uint::from(0x0102u64).to_be_bytes32().unwrap();
        assert_eq!(bytes[30], 0x01);
        assert_eq!(bytes[31], 0x02);
        assert!(bytes[..30].iter().all(|b| *b == 0));
    }

    #[test]
    fn max_u256_fits_but_one_more_does_not() {
        let max = Uint::max_u256();
        assert_eq!(max.to_be_bytes32().unwrap(), [0xFF; 32]);
        let over = &max + 1;
        assert_eq!(over, Uint::pow2(256));
        assert!(matches!(
            over.to_be_bytes32(),
            Err(EncodingError::IntegerTooWide { bits: 256 })
        ));
    }

    #[test]
    fn arithmetic_is_exact_near_2_256() {
        let max = Uint::max_u256();
        let half = Uint::pow2(255);
        assert_eq!(&(&half + &half) - 1, max);
        assert_eq!(&max % 2, Uint::one());
        assert_eq!(&Uint::pow2(255) / 37, Uint::pow2(255).checked_div(&Uint::from(37u64)).unwrap());
    }

    #[test]
    fn checked_ops_guard_zero_and_underflow() {
        let five = Uint::from(5u64);
        let seven = Uint::from(7u64);
        assert!(five.checked_sub(&seven).is_none());
        assert_eq!(seven.checked_sub(&five), Some(Uint::from(2u64)));
        assert!(five.checked_rem(&Uint::zero()).is_none());
        assert_eq!(seven.checked_rem(&five), Some(Uint::from(2u64)));
    }

    #[test]
    fn ordering_follows_value() {
        assert!(Uint::from(3u64) < Uint::from(10u64));
        assert!(Uint::pow2(200) > Uint::from(u64::MAX));
    }

    #[test]
    fn serde_uses_decimal_strings() {
        let v = Uint::pow2(100);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"1267650600228229401496703205376\"");
        let back: Uint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        let from_num: Uint = serde_json::from_str("42").unwrap();
        assert_eq!(from_num, Uint::from(42u64));
        let from_hex: Uint = serde_json::from_str("\"0x2a\"").unwrap();
        assert_eq!(from_hex, Uint::from(42u64));
    }
}
