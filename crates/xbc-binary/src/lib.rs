//! Canonical binary serialization of XAH transactions and ledger objects.
//!
//! JSON objects are encoded field by field in ascending field ordinal, each
//! value preceded by its field header (and by a length prefix for
//! variable-length types). Decoding reverses the process, yielding JSON with
//! field names as keys.
//!
//! # Layout
//!
//! - [`BinaryParser`] / [`BinarySerializer`]: cursor and writer over raw bytes
//! - [`types`]: one codec per serialized type, plus `STObject` and `STArray`
//! - [`binary`]: whole-object entry points, including signing payloads
//! - [`quality`]: the offer quality encoding
//!
//! All entry points take a [`CodecContext`], which names the field registry
//! and address codec to use.

pub mod binary;
pub mod context;
pub mod decimal;
pub mod parser;
pub mod quality;
pub mod serializer;
pub mod types;

pub use binary::{
    binary_to_json, multi_signing_data, serialize_object, signing_claim_data, signing_data,
    ClaimRequest, SerializeOptions,
};
pub use context::CodecContext;
pub use decimal::Decimal;
pub use parser::BinaryParser;
pub use quality::{decode_quality, encode_quality};
pub use serializer::{encode_variable_length, BinarySerializer, MAX_VARIABLE_LENGTH};
pub use types::SerializedType;
