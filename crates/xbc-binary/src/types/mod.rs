//! One codec per serialized type.
//!
//! Leaf types implement [`SerializedType`]. `STObject` and `STArray` recurse
//! through the field registry and are free functions in [`st_object`] and
//! [`st_array`].

pub mod account_id;
pub mod amount;
pub mod blob;
pub mod currency;
pub mod enums;
pub mod hash;
pub mod path_set;
pub mod st_array;
pub mod st_object;
pub mod uint;
pub mod vector256;

use serde_json::Value;
use xbc_definitions::{FieldInfo, FieldKind};
use xbc_types::{AccountId, BytesSink, CodecError, CodecResult, Hash128, Hash160, Hash256};

use crate::context::CodecContext;
use crate::parser::BinaryParser;

pub use amount::{Amount, IssuedAmount};
pub use blob::Blob;
pub use currency::Currency;
pub use enums::EnumValue;
pub use path_set::{Path, PathHop, PathSet};
pub use uint::{UInt16, UInt32, UInt64, UInt8};
pub use vector256::Vector256;

/// A value with a JSON form and a canonical byte form.
pub trait SerializedType: Sized {
    fn from_json(ctx: &CodecContext<'_>, value: &Value) -> CodecResult<Self>;

    /// Read a value. `size` is the length prefix, for variable-length fields.
    fn from_parser(parser: &mut BinaryParser<'_>, size: Option<usize>) -> CodecResult<Self>;

    fn write_to(&self, sink: &mut dyn BytesSink);

    fn to_json(&self, ctx: &CodecContext<'_>) -> Value;

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_to(&mut out);
        out
    }
}

fn encode_as<T: SerializedType>(
    ctx: &CodecContext<'_>,
    value: &Value,
    sink: &mut dyn BytesSink,
) -> CodecResult<()> {
    T::from_json(ctx, value)?.write_to(sink);
    Ok(())
}

fn decode_as<T: SerializedType>(
    ctx: &CodecContext<'_>,
    parser: &mut BinaryParser<'_>,
    size: Option<usize>,
) -> CodecResult<Value> {
    Ok(T::from_parser(parser, size)?.to_json(ctx))
}

/// Encode the value of `field` (without header or length prefix).
pub(crate) fn write_value(
    ctx: &CodecContext<'_>,
    field: &FieldInfo,
    value: &Value,
    sink: &mut dyn BytesSink,
) -> CodecResult<()> {
    match field.kind {
        FieldKind::UInt8 => encode_as::<UInt8>(ctx, value, sink),
        FieldKind::UInt16 => encode_as::<UInt16>(ctx, value, sink),
        FieldKind::UInt32 => encode_as::<UInt32>(ctx, value, sink),
        FieldKind::UInt64 => encode_as::<UInt64>(ctx, value, sink),
        FieldKind::Hash128 => encode_as::<Hash128>(ctx, value, sink),
        FieldKind::Hash160 => encode_as::<Hash160>(ctx, value, sink),
        FieldKind::Hash256 => encode_as::<Hash256>(ctx, value, sink),
        FieldKind::Amount => encode_as::<Amount>(ctx, value, sink),
        FieldKind::Blob => encode_as::<Blob>(ctx, value, sink),
        FieldKind::AccountId => encode_as::<AccountId>(ctx, value, sink),
        FieldKind::PathSet => encode_as::<PathSet>(ctx, value, sink),
        FieldKind::Vector256 => encode_as::<Vector256>(ctx, value, sink),
        FieldKind::Enum(kind) => {
            EnumValue::from_json(ctx, kind, value)?.write_to(sink);
            Ok(())
        }
        FieldKind::StObject => st_object::write_object(ctx, value, false, sink),
        FieldKind::StArray => st_array::write_array(ctx, value, sink),
        FieldKind::Unsupported => Err(CodecError::UnsupportedField(field.name.clone())),
    }
}

/// Decode the value of `field`; `size` is its length prefix, if any.
pub(crate) fn read_value(
    ctx: &CodecContext<'_>,
    field: &FieldInfo,
    parser: &mut BinaryParser<'_>,
    size: Option<usize>,
) -> CodecResult<Value> {
    match field.kind {
        FieldKind::UInt8 => decode_as::<UInt8>(ctx, parser, size),
        FieldKind::UInt16 => decode_as::<UInt16>(ctx, parser, size),
        FieldKind::UInt32 => decode_as::<UInt32>(ctx, parser, size),
        FieldKind::UInt64 => decode_as::<UInt64>(ctx, parser, size),
        FieldKind::Hash128 => decode_as::<Hash128>(ctx, parser, size),
        FieldKind::Hash160 => decode_as::<Hash160>(ctx, parser, size),
        FieldKind::Hash256 => decode_as::<Hash256>(ctx, parser, size),
        FieldKind::Amount => decode_as::<Amount>(ctx, parser, size),
        FieldKind::Blob => decode_as::<Blob>(ctx, parser, size),
        FieldKind::AccountId => decode_as::<AccountId>(ctx, parser, size),
        FieldKind::PathSet => decode_as::<PathSet>(ctx, parser, size),
        FieldKind::Vector256 => decode_as::<Vector256>(ctx, parser, size),
        FieldKind::Enum(kind) => EnumValue::from_parser(kind, parser)?.to_json(ctx),
        FieldKind::StObject => parser.nested(|p| st_object::read_object(ctx, p)),
        FieldKind::StArray => parser.nested(|p| st_array::read_array(ctx, p)),
        FieldKind::Unsupported => Err(CodecError::UnsupportedField(field.name.clone())),
    }
}

/// The string inside `value`, or a format error naming `what`.
pub(crate) fn expect_str<'v>(value: &'v Value, what: &str) -> CodecResult<&'v str> {
    value
        .as_str()
        .ok_or_else(|| CodecError::invalid_value(what, format!("expected a string, got {value}")))
}
