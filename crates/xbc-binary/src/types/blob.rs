use serde_json::Value;
use xbc_types::{BytesSink, CodecError, CodecResult};

use super::{expect_str, SerializedType};
use crate::context::CodecContext;
use crate::parser::BinaryParser;

/// Opaque variable-length bytes, hex in JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Blob(pub Vec<u8>);

impl Blob {
    pub fn from_hex(s: &str) -> CodecResult<Self> {
        hex::decode(s)
            .map(Self)
            .map_err(|e| CodecError::InvalidHex(format!("{s:?}: {e}")))
    }
}

impl SerializedType for Blob {
    fn from_json(_ctx: &CodecContext<'_>, value: &Value) -> CodecResult<Self> {
        Self::from_hex(expect_str(value, "Blob")?)
    }

    fn from_parser(parser: &mut BinaryParser<'_>, size: Option<usize>) -> CodecResult<Self> {
        let len = size.ok_or_else(|| {
            CodecError::invalid_value("Blob", "a blob needs a length prefix")
        })?;
        Ok(Self(parser.read(len)?.to_vec()))
    }

    fn write_to(&self, sink: &mut dyn BytesSink) {
        sink.put(&self.0);
    }

    fn to_json(&self, _ctx: &CodecContext<'_>) -> Value {
        Value::String(hex::encode_upper(&self.0))
    }
}
