use serde_json::Value;
use xbc_types::{BytesSink, CodecError, CodecResult, Hash256};

use super::{expect_str, SerializedType};
use crate::context::CodecContext;
use crate::parser::BinaryParser;

/// Variable-length list of 256-bit hashes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Vector256(pub Vec<Hash256>);

impl SerializedType for Vector256 {
    fn from_json(_ctx: &CodecContext<'_>, value: &Value) -> CodecResult<Self> {
        let items = value.as_array().ok_or_else(|| {
            CodecError::invalid_value("Vector256", format!("expected an array, got {value}"))
        })?;
        items
            .iter()
            .map(|item| Hash256::from_hex(expect_str(item, "Vector256")?))
            .collect::<CodecResult<Vec<_>>>()
            .map(Self)
    }

    fn from_parser(parser: &mut BinaryParser<'_>, size: Option<usize>) -> CodecResult<Self> {
        let len = size.ok_or_else(|| {
            CodecError::invalid_value("Vector256", "a vector needs a length prefix")
        })?;
        if len % 32 != 0 {
            return Err(CodecError::InvalidLength {
                expected: (len / 32 + 1) * 32,
                actual: len,
            });
        }
        (0..len / 32)
            .map(|_| parser.read_array().map(Hash256::from_array))
            .collect::<CodecResult<Vec<_>>>()
            .map(Self)
    }

    fn write_to(&self, sink: &mut dyn BytesSink) {
        for hash in &self.0 {
            sink.put(hash.as_bytes());
        }
    }

    fn to_json(&self, _ctx: &CodecContext<'_>) -> Value {
        Value::Array(self.0.iter().map(|h| Value::String(h.to_hex())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn concatenates_hashes() {
        let ctx = CodecContext::standard();
        let a = "42".repeat(32);
        let b = "AB".repeat(32);
        let v = Vector256::from_json(&ctx, &json!([a, b])).unwrap();
        let bytes = v.to_bytes();
        assert_eq!(bytes.len(), 64);

        let mut p = BinaryParser::new(&bytes);
        let back = Vector256::from_parser(&mut p, Some(64)).unwrap();
        assert_eq!(back.to_json(&ctx), json!([a, b]));
    }

    #[test]
    fn partial_hash_rejected() {
        let mut p = BinaryParser::new(&[0u8; 40]);
        let err = Vector256::from_parser(&mut p, Some(40)).unwrap_err();
        assert!(matches!(err, CodecError::InvalidLength { actual: 40, .. }));
    }
}
