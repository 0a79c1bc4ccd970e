use fairroll_types::EncodingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("signer recovery failed")]
    RecoveryFailed,

    #[error("OS randomness unavailable: {0}")]
    Entropy(String),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
