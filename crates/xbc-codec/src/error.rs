use thiserror::Error;
use xbc_ledger::LedgerError;
use xbc_types::{CodecError, ErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Category of an underlying codec failure, if there is one.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Codec(err) | Self::Ledger(LedgerError::Codec(err)) => Some(err.kind()),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
