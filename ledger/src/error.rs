use fairroll_types::{EncodingError, TxHash};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("transaction {tx} reverted")]
    Reverted { tx: TxHash },

    #[error("transaction {tx} not confirmed within {waited_ms}ms")]
    Timeout { tx: TxHash, waited_ms: u64 },

    #[error("missing address: {0}")]
    MissingAddress(&'static str),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
