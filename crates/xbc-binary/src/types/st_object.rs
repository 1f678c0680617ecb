use std::borrow::Cow;

use serde_json::{Map, Value};
use xbc_definitions::{EnumKind, FieldInfo};
use xbc_types::{BytesSink, CodecError, CodecResult};

use super::enums::EnumValue;
use crate::context::CodecContext;
use crate::parser::BinaryParser;
use crate::serializer::BinarySerializer;

pub const OBJECT_END_MARKER_NAME: &str = "ObjectEndMarker";

type Entries<'v> = Vec<(Cow<'v, str>, Cow<'v, Value>)>;

/// Replace X-address values with classic addresses, moving any embedded tag
/// into the matching tag field.
fn expand_x_addresses<'v>(
    ctx: &CodecContext<'_>,
    map: &'v Map<String, Value>,
) -> CodecResult<Entries<'v>> {
    let mut out = Vec::with_capacity(map.len());
    for (key, value) in map {
        let Some(text) = value
            .as_str()
            .filter(|s| ctx.addresses.is_valid_x_address(s))
        else {
            out.push((Cow::Borrowed(key.as_str()), Cow::Borrowed(value)));
            continue;
        };
        let classic = ctx.addresses.x_address_to_classic(text)?;
        tracing::trace!(field = %key, tag = ?classic.tag, "expanded X-address");
        out.push((
            Cow::Borrowed(key.as_str()),
            Cow::Owned(Value::String(classic.classic)),
        ));
        let Some(tag) = classic.tag else {
            continue;
        };
        let tag_field = match key.as_str() {
            "Account" => "SourceTag",
            "Destination" => "DestinationTag",
            _ => return Err(CodecError::UnexpectedTag(key.clone())),
        };
        if map.contains_key(tag_field) {
            return Err(CodecError::TagConflict {
                field: key.clone(),
                tag_field: tag_field.to_string(),
            });
        }
        out.push((Cow::Borrowed(tag_field), Cow::Owned(Value::from(tag))));
    }
    Ok(out)
}

fn is_unl_modify(ctx: &CodecContext<'_>, entries: &Entries<'_>) -> bool {
    entries
        .iter()
        .find(|(key, _)| key == "TransactionType")
        .and_then(|(_, value)| EnumValue::from_json(ctx, EnumKind::TransactionType, value).ok())
        .and_then(|tt| tt.name(ctx))
        == Some("UNLModify")
}

/// Encode a JSON object as a sequence of fields in ascending ordinal order.
///
/// Unknown keys, non-serialized fields and `null` values are skipped. With
/// `signing_only`, fields that are not signing fields are skipped too. The
/// object's own end marker is not written.
pub fn write_object(
    ctx: &CodecContext<'_>,
    value: &Value,
    signing_only: bool,
    sink: &mut dyn BytesSink,
) -> CodecResult<()> {
    let map = value.as_object().ok_or_else(|| {
        CodecError::invalid_value("STObject", format!("expected an object, got {value}"))
    })?;
    let entries = expand_x_addresses(ctx, map)?;
    let unl_modify = is_unl_modify(ctx, &entries);
    if unl_modify {
        tracing::debug!("UNLModify: writing Account with an empty value");
    }

    let mut serializer = BinarySerializer::new(sink);
    for (field, value) in canonical_fields(ctx, &entries, signing_only) {
        // UNLModify pseudo-transactions carry an empty Account.
        let omit_value = unl_modify && field.name == "Account";
        serializer.write_field_and_value(ctx, field, value, omit_value)?;
    }
    Ok(())
}

/// The serializable entries, in ascending ordinal order.
fn canonical_fields<'c, 'e>(
    ctx: &CodecContext<'c>,
    entries: &'e Entries<'_>,
    signing_only: bool,
) -> Vec<(&'c FieldInfo, &'e Value)> {
    let mut fields = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let Some(field) = ctx.definitions.field(key) else {
            tracing::debug!(field = %key, "skipping unknown field");
            continue;
        };
        if !field.is_serialized || value.is_null() || (signing_only && !field.is_signing_field) {
            continue;
        }
        fields.push((field, value.as_ref()));
    }
    fields.sort_by_key(|(field, _)| field.ordinal);
    fields
}

/// Decode fields until the end of input or an object end marker.
pub fn read_object(ctx: &CodecContext<'_>, parser: &mut BinaryParser<'_>) -> CodecResult<Value> {
    let mut map = Map::new();
    while !parser.is_end() {
        let field = parser.read_field(ctx.definitions)?;
        if field.name == OBJECT_END_MARKER_NAME {
            break;
        }
        let value = parser.read_field_value(ctx, field)?;
        map.insert(field.name.clone(), value);
    }
    Ok(Value::Object(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MAX_NESTING_DEPTH;
    use proptest::prelude::*;
    use serde_json::json;
    use xbc_types::ErrorKind;

    fn ctx() -> CodecContext<'static> {
        CodecContext::standard()
    }

    fn encode(value: Value) -> CodecResult<Vec<u8>> {
        let mut out = Vec::new();
        write_object(&ctx(), &value, false, &mut out)?;
        Ok(out)
    }

    fn decode(bytes: &[u8]) -> Value {
        read_object(&ctx(), &mut BinaryParser::new(bytes)).unwrap()
    }

    #[test]
    fn fields_sorted_by_ordinal() {
        let bytes = encode(json!({"Sequence": 1, "Flags": 0, "TransactionType": "Payment"})).unwrap();
        // TransactionType, Flags, Sequence
        assert_eq!(hex::encode_upper(&bytes), "12000022000000002400000001");
    }

    #[test]
    fn unknown_keys_and_nulls_skipped() {
        let bytes = encode(json!({"Flags": 0, "NotAField": 5, "Sequence": null, "hash": "00"})).unwrap();
        assert_eq!(hex::encode_upper(bytes), "2200000000");
    }

    #[test]
    fn nested_objects_and_arrays() {
        let value = json!({
            "Memos": [
                {"Memo": {"MemoType": "74657374", "MemoData": "AB"}}
            ]
        });
        let bytes = encode(value.clone()).unwrap();
        assert_eq!(
            hex::encode_upper(&bytes),
            "F9EA7C04746573747D01ABE1F1"
        );
        assert_eq!(decode(&bytes), value);
    }

    #[test]
    fn x_address_tags_move_to_tag_fields() {
        let bytes = encode(json!({
            "Account": "XVbLX9oZskZjyu4wTw86a1mPzyjiPGLPVLZZXrm7zGWJGLE",
            "Destination": "X7WZKEeNVS2p9Tire9DtNFkzWBZbFtPE4cUXQNL7V7Ntfnn"
        }))
        .unwrap();
        let decoded = decode(&bytes);
        assert_eq!(
            decoded,
            json!({
                "Account": "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys",
                "SourceTag": 12,
                "Destination": "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B",
                "DestinationTag": 7
            })
        );
    }

    #[test]
    fn x_address_tag_conflicts() {
        let err = encode(json!({
            "Account": "XVbLX9oZskZjyu4wTw86a1mPzyjiPGLPVLZZXrm7zGWJGLE",
            "SourceTag": 12
        }))
        .unwrap_err();
        assert!(matches!(err, CodecError::TagConflict { .. }));
        assert_eq!(err.kind(), ErrorKind::Semantic);

        let err = encode(json!({
            "Owner": "XVbLX9oZskZjyu4wTw86a1mPzyjiPGLPVLZZXrm7zGWJGLE"
        }))
        .unwrap_err();
        assert_eq!(err, CodecError::UnexpectedTag("Owner".into()));
    }

    #[test]
    fn tagless_x_address_anywhere() {
        let bytes = encode(json!({
            "Owner": "XVbLX9oZskZjyu4wTw86a1mPzyjiPGELwGvdiHQsKpwGc5R"
        }))
        .unwrap();
        assert_eq!(
            decode(&bytes),
            json!({"Owner": "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys"})
        );
    }

    #[test]
    fn signing_filter() {
        let mut out = Vec::new();
        write_object(
            &ctx(),
            &json!({"Flags": 0, "TxnSignature": "AB"}),
            true,
            &mut out,
        )
        .unwrap();
        assert_eq!(hex::encode_upper(out), "2200000000");
    }

    #[test]
    fn unl_modify_account_is_empty() {
        let value = json!({
            "TransactionType": "UNLModify",
            "Account": "rrrrrrrrrrrrrrrrrrrrrhoLvTp",
            "UNLModifyDisabling": 1
        });
        let bytes = encode(value.clone()).unwrap();
        // TransactionType, Account with zero length, UNLModifyDisabling.
        assert_eq!(hex::encode_upper(&bytes), "120066810000101101");
        assert_eq!(decode(&bytes), value);
    }

    #[test]
    fn stops_at_end_marker() {
        let mut p = BinaryParser::new(&[0x22, 0, 0, 0, 1, 0xE1, 0x22]);
        let value = read_object(&ctx(), &mut p).unwrap();
        assert_eq!(value, json!({"Flags": 1}));
        assert_eq!(p.remaining(), 1);
    }

    #[test]
    fn not_an_object() {
        assert!(encode(json!([1, 2])).is_err());
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let shallow = [0xEA, 0xEA, 0xEA, 0xE1, 0xE1, 0xE1];
        assert_eq!(decode(&shallow), json!({"Memo": {"Memo": {"Memo": {}}}}));

        let deep = vec![0xEA; 10_000];
        let err = read_object(&ctx(), &mut BinaryParser::new(&deep)).unwrap_err();
        assert_eq!(err, CodecError::NestingTooDeep(MAX_NESTING_DEPTH));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    fn payment_entries() -> Vec<(&'static str, Value)> {
        vec![
            ("TransactionType", json!("Payment")),
            ("Flags", json!(2_147_483_648u32)),
            ("Sequence", json!(10)),
            ("LastLedgerSequence", json!(1234)),
            ("DestinationTag", json!(7)),
            (
                "Amount",
                json!({
                    "currency": "USD",
                    "issuer": "rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B",
                    "value": "7072.8"
                }),
            ),
            ("Fee", json!("12")),
            ("SigningPubKey", json!("03AB")),
            ("TxnSignature", json!("DEADBEEF")),
            ("Account", json!("rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys")),
            ("Destination", json!("rvYAfWj5gh67oV6fW32ZzP3Aw4Eubs59B")),
            (
                "Memos",
                json!([{"Memo": {"MemoType": "74657374", "MemoData": "AB"}}]),
            ),
        ]
    }

    fn to_object(entries: &[(&str, Value)]) -> Value {
        Value::Object(
            entries
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        )
    }

    #[test]
    fn encoded_ordinals_ascend() {
        let ctx = ctx();
        let bytes = encode(to_object(&payment_entries())).unwrap();
        let mut p = BinaryParser::new(&bytes);
        let mut previous = None;
        let mut count = 0;
        while !p.is_end() {
            let (type_code, nth) = p.read_field_ordinal().unwrap();
            assert!(previous < Some((type_code, nth)), "{type_code}/{nth} out of order");
            previous = Some((type_code, nth));
            let field = ctx.definitions.field_by_ordinal(type_code, nth).unwrap();
            p.read_field_value(&ctx, field).unwrap();
            count += 1;
        }
        assert_eq!(count, payment_entries().len());
    }

    proptest! {
        #[test]
        fn field_order_does_not_change_encoding(
            shuffled in Just(payment_entries()).prop_shuffle()
        ) {
            let ctx = ctx();
            let canonical = encode(to_object(&payment_entries())).unwrap();
            prop_assert_eq!(encode(to_object(&shuffled)).unwrap(), canonical);

            let entries: Entries<'_> = shuffled
                .iter()
                .map(|(key, value)| (Cow::Borrowed(*key), Cow::Borrowed(value)))
                .collect();
            let ordinals: Vec<u32> = canonical_fields(&ctx, &entries, false)
                .iter()
                .map(|(field, _)| field.ordinal)
                .collect();
            prop_assert_eq!(ordinals.len(), shuffled.len());
            prop_assert!(ordinals.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
