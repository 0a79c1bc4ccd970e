//! Encoding errors shared across crates.

use thiserror::Error;

/// A value could not be encoded or decoded into its canonical byte form.
///
/// These are always caller bugs: the same input fails the same way every time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid length for {kind}: expected {expected} bytes, got {got}")]
    InvalidLength {
        kind: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("integer does not fit in {bits} bits")]
    IntegerTooWide { bits: u64 },

    #[error("invalid integer literal: {0}")]
    InvalidInteger(String),

    #[error("value does not match declared kind {kind}: {detail}")]
    KindMismatch { kind: &'static str, detail: String },

    #[error("invalid range: {0}")]
    InvalidRange(String),
}
