use serde_json::{Map, Value};
use xbc_definitions::FieldKind;
use xbc_types::{BytesSink, CodecError, CodecResult};

use crate::context::CodecContext;
use crate::parser::BinaryParser;
use crate::serializer::{BinarySerializer, ARRAY_END_MARKER};

pub const ARRAY_END_MARKER_NAME: &str = "ArrayEndMarker";

/// The single `(key, value)` of an array element.
fn single_entry(item: &Value) -> CodecResult<(&str, &Value)> {
    match item.as_object() {
        Some(map) if map.len() == 1 => map
            .iter()
            .next()
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| CodecError::invalid_value("STArray", "empty element")),
        _ => Err(CodecError::invalid_value(
            "STArray",
            format!("each element must be an object with one key, got {item}"),
        )),
    }
}

/// Encode an array of single-key wrapper objects, each as
/// `header || object || 0xE1`, followed by `0xF1`.
pub fn write_array(ctx: &CodecContext<'_>, value: &Value, sink: &mut dyn BytesSink) -> CodecResult<()> {
    let items = value.as_array().ok_or_else(|| {
        CodecError::invalid_value("STArray", format!("expected an array, got {value}"))
    })?;
    let mut serializer = BinarySerializer::new(sink);
    for item in items {
        let (name, inner) = single_entry(item)?;
        let field = ctx
            .definitions
            .field(name)
            .ok_or_else(|| CodecError::UnknownField(name.to_string()))?;
        if field.kind != FieldKind::StObject {
            return Err(CodecError::invalid_value(
                "STArray",
                format!("{name} is not an object field"),
            ));
        }
        serializer.write_field_and_value(ctx, field, inner, false)?;
    }
    serializer.put(&[ARRAY_END_MARKER]);
    Ok(())
}

/// Decode wrapper objects until the end of input or an array end marker.
pub fn read_array(ctx: &CodecContext<'_>, parser: &mut BinaryParser<'_>) -> CodecResult<Value> {
    let mut items = Vec::new();
    while !parser.is_end() {
        let field = parser.read_field(ctx.definitions)?;
        if field.name == ARRAY_END_MARKER_NAME {
            break;
        }
        let value = parser.read_field_value(ctx, field)?;
        let mut wrapper = Map::new();
        wrapper.insert(field.name.clone(), value);
        items.push(Value::Object(wrapper));
    }
    Ok(Value::Array(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> CodecContext<'static> {
        CodecContext::standard()
    }

    #[test]
    fn empty_array_is_end_marker() {
        let mut out = Vec::new();
        write_array(&ctx(), &json!([]), &mut out).unwrap();
        assert_eq!(out, vec![ARRAY_END_MARKER]);

        let value = read_array(&ctx(), &mut BinaryParser::new(&out)).unwrap();
        assert_eq!(value, json!([]));
    }

    #[test]
    fn signer_entries() {
        let value = json!([
            {"SignerEntry": {"Account": "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys", "SignerWeight": 1}},
            {"SignerEntry": {"Account": "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B", "SignerWeight": 2}}
        ]);
        let mut out = Vec::new();
        write_array(&ctx(), &value, &mut out).unwrap();
        assert_eq!(out[0], 0xEB);
        assert_eq!(*out.last().unwrap(), ARRAY_END_MARKER);
        assert_eq!(out.iter().filter(|b| **b == 0xE1).count(), 2);

        let back = read_array(&ctx(), &mut BinaryParser::new(&out)).unwrap();
        assert_eq!(back, value);
    }

    #[test]
    fn malformed_elements_rejected() {
        let mut out = Vec::new();
        assert!(write_array(&ctx(), &json!([{"A": {}, "B": {}}]), &mut out).is_err());
        assert!(write_array(&ctx(), &json!(["Memo"]), &mut out).is_err());
        assert!(matches!(
            write_array(&ctx(), &json!([{"Bogus": {}}]), &mut out),
            Err(CodecError::UnknownField(_))
        ));
        assert!(write_array(&ctx(), &json!([{"Flags": 1}]), &mut out).is_err());
    }
}
