//! Token amounts.
//!
//! Amounts are held as exact integers of base units (wei for the native coin,
//! the token's smallest unit for ERC20 balances). The platform token and the
//! native coin both use 18 decimals.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{EncodingError, Uint};

/// An amount in base units with 18 decimals.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAmount(Uint);

impl TokenAmount {
    pub const DECIMALS: u32 = 18;

    pub fn zero() -> Self {
        Self(Uint::zero())
    }

    pub fn from_base_units(raw: impl Into<Uint>) -> Self {
        Self(raw.into())
    }

    /// Whole tokens, e.g. `from_whole(2)` is `2 * 10^18` base units.
    pub fn from_whole(tokens: u64) -> Self {
        Self(&Uint::from(tokens) * &Self::unit())
    }

    /// Parse a decimal token amount such as `"1.5"` exactly.
    ///
    /// Digits beyond the 18th decimal place are truncated.
    pub fn parse_tokens(s: &str) -> Result<Self, EncodingError> {
        let s = s.trim();
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(EncodingError::InvalidInteger(s.to_string()));
        }
        let whole = if whole.is_empty() {
            Uint::zero()
        } else {
            Uint::from_dec_str(whole)?
        };
        let mut frac: String = frac.chars().take(Self::DECIMALS as usize).collect();
        while frac.len() < Self::DECIMALS as usize {
            frac.push('0');
        }
        let frac = Uint::from_dec_str(&frac)?;
        Ok(Self(&(&whole * &Self::unit()) + &frac))
    }

    pub fn base_units(&self) -> &Uint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Lossy conversion for display.
    pub fn to_tokens_f64(&self) -> f64 {
        self.to_decimal_string().parse().unwrap_or(f64::MAX)
    }

    /// Exact decimal rendering with trailing zeros removed, e.g. `"1.5"`.
    pub fn to_decimal_string(&self) -> String {
        let unit = Self::unit();
        let whole = &self.0 / &unit;
        let frac = &self.0 % &unit;
        if frac.is_zero() {
            return whole.to_string();
        }
        let frac = format!("{:0>18}", frac.to_string());
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }

    fn unit() -> Uint {
        Uint::from(10u64.pow(Self::DECIMALS))
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}
