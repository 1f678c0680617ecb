use xbc_types::CodecError;

/// Errors produced by ledger hashing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
