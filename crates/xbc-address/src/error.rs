use thiserror::Error;
use xbc_types::CodecError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("base58 decoding failed: {0}")]
    Base58(String),

    #[error("unexpected version prefix {found:02X?}")]
    Version { found: Vec<u8> },

    #[error("decoded payload has {actual} bytes, expected {expected}")]
    PayloadLength { expected: usize, actual: usize },

    #[error("invalid X-address tag flag: {0}")]
    TagFlag(u8),

    #[error("X-address without a tag must have zero tag bytes")]
    StrayTagBytes,

    #[error("64-bit tags are not supported")]
    WideTag,
}

pub type AddressResult<T> = Result<T, AddressError>;

impl From<AddressError> for CodecError {
    fn from(err: AddressError) -> Self {
        CodecError::InvalidAddress(err.to_string())
    }
}
