//! Hex-in, hex-out API of the XAH binary codec.
//!
//! The free functions use the bundled definitions and the standard base58
//! address codec. Build a [`BinaryCodec`] from a custom [`CodecContext`] to
//! encode against another network's definitions.

pub mod codec;
pub mod error;

pub use codec::BinaryCodec;
pub use error::{ApiError, ApiResult};

// Re-export key types
pub use serde_json::Value;
pub use xbc_binary::{ClaimRequest, CodecContext, Decimal};
pub use xbc_definitions::{Definitions, FieldInfo};
pub use xbc_ledger::LedgerHeader;
pub use xbc_types::{CodecError, ErrorKind, Hash256};

/// Decode a hex blob into its JSON form.
pub fn decode(hex: &str) -> ApiResult<Value> {
    BinaryCodec::standard().decode(hex)
}

/// Encode a JSON object as uppercase hex.
pub fn encode(json: &Value) -> ApiResult<String> {
    BinaryCodec::standard().encode(json)
}

/// Encode a transaction for single signing.
pub fn encode_for_signing(json: &Value) -> ApiResult<String> {
    BinaryCodec::standard().encode_for_signing(json)
}

/// Encode a payment channel claim (`channel`, `amount`) for signing.
pub fn encode_for_signing_claim(json: &Value) -> ApiResult<String> {
    BinaryCodec::standard().encode_for_signing_claim(json)
}

/// Encode a transaction for signing by `signer`, one of several signers.
pub fn encode_for_multisigning(json: &Value, signer: &str) -> ApiResult<String> {
    BinaryCodec::standard().encode_for_multisigning(json, signer)
}

pub fn encode_quality(value: &str) -> ApiResult<String> {
    BinaryCodec::standard().encode_quality(value)
}

pub fn decode_quality(hex: &str) -> ApiResult<String> {
    BinaryCodec::standard().decode_quality(hex)
}

pub fn decode_ledger_data(hex: &str) -> ApiResult<LedgerHeader> {
    BinaryCodec::standard().decode_ledger_data(hex)
}

/// Transaction hash of a signed transaction blob.
pub fn transaction_id(hex: &str) -> ApiResult<Hash256> {
    BinaryCodec::standard().transaction_id(hex)
}
