use serde_json::Value;
use xbc_types::{BytesSink, CodecError, CodecResult};

use super::SerializedType;
use crate::context::CodecContext;
use crate::parser::BinaryParser;

fn out_of_range(type_name: &'static str, value: impl ToString) -> CodecError {
    CodecError::OutOfRange {
        type_name,
        value: value.to_string(),
    }
}

/// Unsigned integer from a JSON number or decimal string.
fn decimal_uint(value: &Value, type_name: &'static str) -> CodecResult<u64> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(v) => Ok(v),
            None if n.as_i64().is_some() => Err(out_of_range(type_name, n)),
            None => Err(CodecError::invalid_value(type_name, format!("not an integer: {n}"))),
        },
        Value::String(s) => match s.parse::<i128>() {
            Ok(v) => u64::try_from(v).map_err(|_| out_of_range(type_name, s)),
            Err(_) => Err(CodecError::invalid_value(
                type_name,
                format!("not an integer: {s:?}"),
            )),
        },
        other => Err(CodecError::invalid_value(
            type_name,
            format!("expected a number or string, got {other}"),
        )),
    }
}

macro_rules! uint_type {
    ($(#[$meta:meta])* $name:ident, $inner:ty) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub $inner);

        impl SerializedType for $name {
            fn from_json(_ctx: &CodecContext<'_>, value: &Value) -> CodecResult<Self> {
                let wide = decimal_uint(value, stringify!($name))?;
                <$inner>::try_from(wide)
                    .map(Self)
                    .map_err(|_| out_of_range(stringify!($name), wide))
            }

            fn from_parser(parser: &mut BinaryParser<'_>, _size: Option<usize>) -> CodecResult<Self> {
                parser.read_array().map(<$inner>::from_be_bytes).map(Self)
            }

            fn write_to(&self, sink: &mut dyn BytesSink) {
                sink.put(&self.0.to_be_bytes());
            }

            fn to_json(&self, _ctx: &CodecContext<'_>) -> Value {
                Value::from(self.0)
            }
        }
    };
}

uint_type!(
    /// 8-bit unsigned integer.
    UInt8,
    u8
);
uint_type!(
    /// 16-bit unsigned integer.
    UInt16,
    u16
);
uint_type!(
    /// 32-bit unsigned integer.
    UInt32,
    u32
);

/// 64-bit unsigned integer.
///
/// The JSON form is hex (1-16 digits in, 16 uppercase digits out) because
/// the values exceed what JSON numbers represent exactly. Plain JSON
/// numbers are accepted on input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UInt64(pub u64);

impl UInt64 {
    pub fn from_hex(s: &str) -> CodecResult<Self> {
        if s.is_empty() || s.len() > 16 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CodecError::invalid_value(
                "UInt64",
                format!("expected 1-16 hex digits, got {s:?}"),
            ));
        }
        u64::from_str_radix(s, 16)
            .map(Self)
            .map_err(|e| CodecError::invalid_value("UInt64", e.to_string()))
    }
}

impl SerializedType for UInt64 {
    fn from_json(_ctx: &CodecContext<'_>, value: &Value) -> CodecResult<Self> {
        match value {
            Value::String(s) => Self::from_hex(s),
            Value::Number(_) => decimal_uint(value, "UInt64").map(Self),
            other => Err(CodecError::invalid_value(
                "UInt64",
                format!("expected a hex string or number, got {other}"),
            )),
        }
    }

    fn from_parser(parser: &mut BinaryParser<'_>, _size: Option<usize>) -> CodecResult<Self> {
        parser.read_u64().map(Self)
    }

    fn write_to(&self, sink: &mut dyn BytesSink) {
        sink.put(&self.0.to_be_bytes());
    }

    fn to_json(&self, _ctx: &CodecContext<'_>) -> Value {
        Value::String(format!("{:016X}", self.0))
    }
}
