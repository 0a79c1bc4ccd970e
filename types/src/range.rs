//! Inclusive draw ranges and the batches drawn from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{EncodingError, Uint};

/// An inclusive `[lo, hi]` range. `lo > hi` is accepted and treated as the
/// swapped range.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeSpec {
    pub lo: Uint,
    pub hi: Uint,
}

impl RangeSpec {
    pub fn new(lo: impl Into<Uint>, hi: impl Into<Uint>) -> Self {
        Self {
            lo: lo.into(),
            hi: hi.into(),
        }
    }

    /// The same range with `lo <= hi`.
    pub fn normalized(&self) -> Self {
        if self.lo > self.hi {
            Self {
                lo: self.hi.clone(),
                hi: self.lo.clone(),
            }
        } else {
            self.clone()
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.lo == self.hi
    }

    /// Number of integers in the range: `hi - lo + 1` after normalization.
    pub fn span(&self) -> Uint {
        let n = self.normalized();
        &(&n.hi - &n.lo) + 1
    }

    pub fn contains(&self, value: &Uint) -> bool {
        let n = self.normalized();
        &n.lo <= value && value <= &n.hi
    }
}

impl From<(u64, u64)> for RangeSpec {
    fn from((lo, hi): (u64, u64)) -> Self {
        Self::new(lo, hi)
    }
}

/// Parses `lo:hi`, each side decimal or `0x`-hex.
impl FromStr for RangeSpec {
    type Err = EncodingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lo, hi) = s
            .split_once(':')
            .ok_or_else(|| EncodingError::InvalidRange(format!("expected lo:hi, got {s:?}")))?;
        Ok(Self {
            lo: Uint::parse(lo)?,
            hi: Uint::parse(hi)?,
        })
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// One drawn integer.
pub type Draw = Uint;

/// Draws for one round, index-aligned with the ranges they were drawn from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawBatch(Vec<Draw>);

impl DrawBatch {
    pub fn new(draws: Vec<Draw>) -> Self {
        Self(draws)
    }

    pub fn as_slice(&self) -> &[Draw] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Draw> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Draw> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Draw> {
        self.0
    }

    /// Narrow every draw to `u64`, or `None` if any does not fit.
    pub fn to_u64_vec(&self) -> Option<Vec<u64>> {
        self.0.iter().map(Uint::to_u64).collect()
    }
}

impl IntoIterator for DrawBatch {
    type Item = Draw;
    type IntoIter = std::vec::IntoIter<Draw>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a DrawBatch {
    type Item = &'a Draw;
    type IntoIter = std::slice::Iter<'a, Draw>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Draw> for DrawBatch {
    fn from_iter<I: IntoIterator<Item = Draw>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
