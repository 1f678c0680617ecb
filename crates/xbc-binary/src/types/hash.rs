use serde_json::Value;
use xbc_types::{BytesSink, CodecError, CodecResult, Hash};

use super::{expect_str, SerializedType};
use crate::context::CodecContext;
use crate::parser::BinaryParser;

/// `Hash128` fields use the empty string for the all-zero value.
const fn empty_is_zero(width: usize) -> bool {
    width == 16
}

impl<const N: usize> SerializedType for Hash<N> {
    fn from_json(_ctx: &CodecContext<'_>, value: &Value) -> CodecResult<Self> {
        let s = expect_str(value, "Hash")?;
        if s.is_empty() && empty_is_zero(N) {
            return Ok(Self::ZERO);
        }
        Self::from_hex(s)
    }

    fn from_parser(parser: &mut BinaryParser<'_>, size: Option<usize>) -> CodecResult<Self> {
        match size {
            None => parser.read_array().map(Self::from_array),
            Some(0) => Ok(Self::ZERO),
            Some(n) if n == N => parser.read_array().map(Self::from_array),
            Some(n) => Err(CodecError::InvalidLength {
                expected: N,
                actual: n,
            }),
        }
    }

    fn write_to(&self, sink: &mut dyn BytesSink) {
        sink.put(self.as_bytes());
    }

    fn to_json(&self, _ctx: &CodecContext<'_>) -> Value {
        if self.is_zero() && empty_is_zero(N) {
            return Value::String(String::new());
        }
        Value::String(self.to_hex())
    }
}
