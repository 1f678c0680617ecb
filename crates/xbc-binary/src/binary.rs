use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use xbc_crypto::HashPrefix;
use xbc_types::{BytesSink, CodecError, CodecResult, Hash256};

use crate::context::CodecContext;
use crate::parser::BinaryParser;
use crate::types::account_id::parse_account;
use crate::types::st_object;

/// Framing and filtering for [`serialize_object`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SerializeOptions<'o> {
    /// Bytes written before the object.
    pub prefix: Option<&'o [u8]>,
    /// Bytes written after the object.
    pub suffix: Option<&'o [u8]>,
    /// Keep only fields flagged as signing fields.
    pub signing_fields_only: bool,
}

/// A payment channel claim to be signed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// Channel id, 64 hex digits.
    pub channel: String,
    /// Claimed amount in drops. JSON input may give it as a number.
    #[serde(deserialize_with = "drops_text")]
    pub amount: String,
}

/// A drop count given as a JSON string or number, kept as its decimal text.
fn drops_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n.to_string(),
        Raw::Text(text) => text,
    })
}

/// Serialize a top-level JSON object.
pub fn serialize_object(
    ctx: &CodecContext<'_>,
    value: &Value,
    options: SerializeOptions<'_>,
) -> CodecResult<Vec<u8>> {
    let mut out = Vec::new();
    if let Some(prefix) = options.prefix {
        out.put(prefix);
    }
    st_object::write_object(ctx, value, options.signing_fields_only, &mut out)?;
    if let Some(suffix) = options.suffix {
        out.put(suffix);
    }
    Ok(out)
}

/// Decode a top-level object.
pub fn binary_to_json(ctx: &CodecContext<'_>, bytes: &[u8]) -> CodecResult<Value> {
    st_object::read_object(ctx, &mut BinaryParser::new(bytes))
}

/// Bytes a single signer signs: `STX\0` followed by the signing fields.
pub fn signing_data(ctx: &CodecContext<'_>, tx: &Value) -> CodecResult<Vec<u8>> {
    let prefix = HashPrefix::TRANSACTION_SIG.bytes();
    serialize_object(
        ctx,
        tx,
        SerializeOptions {
            prefix: Some(&prefix),
            suffix: None,
            signing_fields_only: true,
        },
    )
}

/// Bytes one of several signers signs: `SMT\0`, the signing fields, then the
/// signer's account id.
///
/// The transaction's `SigningPubKey` must be present and empty.
pub fn multi_signing_data(
    ctx: &CodecContext<'_>,
    tx: &Value,
    signing_account: &str,
) -> CodecResult<Vec<u8>> {
    if tx.get("SigningPubKey").and_then(Value::as_str) != Some("") {
        return Err(CodecError::SigningPubKeyNotEmpty);
    }
    let prefix = HashPrefix::TRANSACTION_MULTI_SIG.bytes();
    let account = parse_account(ctx, signing_account)?;
    serialize_object(
        ctx,
        tx,
        SerializeOptions {
            prefix: Some(&prefix),
            suffix: Some(account.as_bytes()),
            signing_fields_only: true,
        },
    )
}

/// Bytes signed to authorize a payment channel claim:
/// `CLM\0 || channel || amount as UInt64`.
pub fn signing_claim_data(claim: &ClaimRequest) -> CodecResult<Vec<u8>> {
    let channel = Hash256::from_hex(&claim.channel)?;
    if claim.amount.is_empty() || !claim.amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CodecError::InvalidAmount(format!(
            "claim amount must be a whole number of drops: {:?}",
            claim.amount
        )));
    }
    let amount: u64 = claim.amount.parse().map_err(|_| CodecError::OutOfRange {
        type_name: "UInt64",
        value: claim.amount.clone(),
    })?;

    let mut out = Vec::with_capacity(4 + 32 + 8);
    out.put(&HashPrefix::PAYMENT_CHANNEL_CLAIM.bytes());
    out.put(channel.as_bytes());
    out.put(&amount.to_be_bytes());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use xbc_types::ErrorKind;

    fn ctx() -> CodecContext<'static> {
        CodecContext::standard()
    }

    fn tx() -> Value {
        json!({
            "TransactionType": "Payment",
            "Flags": 0,
            "SigningPubKey": "",
            "TxnSignature": "DEADBEEF",
            "Signers": []
        })
    }

    #[test]
    fn prefix_and_suffix_frame_the_object() {
        let out = serialize_object(
            &ctx(),
            &json!({"Flags": 1}),
            SerializeOptions {
                prefix: Some(&[0xAA]),
                suffix: Some(&[0xBB]),
                signing_fields_only: false,
            },
        )
        .unwrap();
        assert_eq!(out, vec![0xAA, 0x22, 0, 0, 0, 1, 0xBB]);
    }

    #[test]
    fn signing_data_drops_signatures() {
        let out = signing_data(&ctx(), &tx()).unwrap();
        assert_eq!(&out[..4], b"STX\0");
        // TransactionType, Flags, empty SigningPubKey
        assert_eq!(hex::encode_upper(&out[4..]), "12000022000000007300");
    }

    #[test]
    fn multi_signing_appends_account() {
        let out = multi_signing_data(&ctx(), &tx(), "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys").unwrap();
        assert_eq!(&out[..4], b"SMT\0");
        assert_eq!(
            hex::encode_upper(&out[out.len() - 20..]),
            "DD76483FACDEE26E60D8A586BB58D09F27045C46"
        );
    }

    #[test]
    fn multi_signing_requires_empty_pub_key() {
        let mut t = tx();
        t["SigningPubKey"] = json!("03AB");
        let err = multi_signing_data(&ctx(), &t, "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys").unwrap_err();
        assert_eq!(err, CodecError::SigningPubKeyNotEmpty);
        assert_eq!(err.kind(), ErrorKind::Semantic);

        let mut t = tx();
        t.as_object_mut().unwrap().remove("SigningPubKey");
        assert!(multi_signing_data(&ctx(), &t, "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys").is_err());
    }

    #[test]
    fn claim_layout() {
        let claim = ClaimRequest {
            channel: "43904CBFCDCEC530B4037871F86EE90BF799DF8D2E0EA564BC8A3F332E4F5FB1".into(),
            amount: "1000".into(),
        };
        let out = signing_claim_data(&claim).unwrap();
        assert_eq!(
            hex::encode_upper(out),
            "434C4D00".to_owned()
                + "43904CBFCDCEC530B4037871F86EE90BF799DF8D2E0EA564BC8A3F332E4F5FB1"
                + "00000000000003E8"
        );
    }

    #[test]
    fn claim_rejects_bad_amount() {
        let claim = ClaimRequest {
            channel: "00".repeat(32),
            amount: "1.5".into(),
        };
        assert!(signing_claim_data(&claim).is_err());
    }

    #[test]
    fn claim_amount_accepts_json_numbers() {
        let channel = "43904CBFCDCEC530B4037871F86EE90BF799DF8D2E0EA564BC8A3F332E4F5FB1";
        let from_number: ClaimRequest =
            serde_json::from_value(json!({"channel": channel, "amount": 1000})).unwrap();
        let from_text: ClaimRequest =
            serde_json::from_value(json!({"channel": channel, "amount": "1000"})).unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(
            signing_claim_data(&from_number).unwrap(),
            signing_claim_data(&from_text).unwrap()
        );

        let fractional: ClaimRequest =
            serde_json::from_value(json!({"channel": channel, "amount": 1.5})).unwrap();
        assert!(matches!(
            signing_claim_data(&fractional),
            Err(CodecError::InvalidAmount(_))
        ));
    }

    #[test]
    fn decode_top_level() {
        let bytes = hex::decode("1200002200000000").unwrap();
        assert_eq!(
            binary_to_json(&ctx(), &bytes).unwrap(),
            json!({"TransactionType": "Payment", "Flags": 0})
        );
    }
}
