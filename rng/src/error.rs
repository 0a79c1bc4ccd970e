use fairroll_crypto::CryptoError;
use fairroll_types::{Address, Draw, EncodingError, Uint, H256};
use thiserror::Error;

/// Failures of the range sampler. Both are deterministic in the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SamplerError {
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("range span {span} exceeds 2^255")]
    RangeOverflow { span: Uint },
}

#[derive(Debug, Error)]
pub enum RngError {
    #[error("entropy source failed: {0}")]
    Entropy(String),

    #[error(transparent)]
    Sampler(#[from] SamplerError),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error("digest mismatch: expected {expected}, record has {found}")]
    DigestMismatch { expected: H256, found: H256 },

    #[error("signer mismatch: expected {expected}, recovered {recovered}")]
    SignerMismatch { expected: Address, recovered: Address },

    #[error("draw count mismatch: expected {expected}, record has {found}")]
    DrawCountMismatch { expected: usize, found: usize },

    #[error("draw {index} mismatch: expected {expected}, record has {found}")]
    DrawMismatch {
        index: usize,
        expected: Draw,
        found: Draw,
    },
}
