use serde_json::Value;
use xbc_types::{AccountId, BytesSink, CodecError, CodecResult, Hash160};

use super::{expect_str, SerializedType};
use crate::context::CodecContext;
use crate::parser::BinaryParser;

fn is_upper_hex_40(s: &str) -> bool {
    s.len() == 40 && s.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}

/// Parse any accepted account form: empty (the zero account), 40 uppercase
/// hex digits, a tagless X-address, or a classic address.
pub fn parse_account(ctx: &CodecContext<'_>, text: &str) -> CodecResult<AccountId> {
    if text.is_empty() {
        return Ok(AccountId::ZERO);
    }
    if is_upper_hex_40(text) {
        return AccountId::from_hex(text);
    }
    if ctx.addresses.is_valid_x_address(text) {
        let x = ctx.addresses.decode_x_address(text)?;
        if x.tag.is_some() {
            return Err(CodecError::UnexpectedTag(text.to_string()));
        }
        return Ok(x.account_id);
    }
    Ok(ctx.addresses.decode_account_id(text)?)
}

impl SerializedType for AccountId {
    fn from_json(ctx: &CodecContext<'_>, value: &Value) -> CodecResult<Self> {
        parse_account(ctx, expect_str(value, "AccountID")?)
    }

    /// A zero length prefix decodes as the zero account.
    fn from_parser(parser: &mut BinaryParser<'_>, size: Option<usize>) -> CodecResult<Self> {
        Hash160::from_parser(parser, size).map(AccountId::from)
    }

    fn write_to(&self, sink: &mut dyn BytesSink) {
        sink.put(self.as_bytes());
    }

    fn to_json(&self, ctx: &CodecContext<'_>) -> Value {
        Value::String(ctx.addresses.encode_account_id(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use xbc_types::ErrorKind;

    fn ctx() -> CodecContext<'static> {
        CodecContext::standard()
    }

    const HEX: &str = "DD76483FACDEE26E60D8A586BB58D09F27045C46";
    const CLASSIC: &str = "rMBzp8CgpE441cp5PVyA9rpVV7oT8hP3ys";

    #[test]
    fn accepted_forms() {
        let from_classic = AccountId::from_json(&ctx(), &json!(CLASSIC)).unwrap();
        let from_hex = AccountId::from_json(&ctx(), &json!(HEX)).unwrap();
        assert_eq!(from_classic, from_hex);
        assert_eq!(from_classic.to_json(&ctx()), json!(CLASSIC));

        let zero = AccountId::from_json(&ctx(), &json!("")).unwrap();
        assert_eq!(zero.to_json(&ctx()), json!("rrrrrrrrrrrrrrrrrrrrrhoLvTp"));
    }

    #[test]
    fn tagless_x_address_accepted() {
        let id = AccountId::from_json(
            &ctx(),
            &json!("XVbLX9oZskZjyu4wTw86a1mPzyjiPGELwGvdiHQsKpwGc5R"),
        )
        .unwrap();
        assert_eq!(id.to_hex(), HEX);
    }

    #[test]
    fn tagged_x_address_rejected() {
        let err = AccountId::from_json(
            &ctx(),
            &json!("XVbLX9oZskZjyu4wTw86a1mPzyjiPGLPVLZZXrm7zGWJGLE"),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Semantic);
    }

    #[test]
    fn garbage_is_address_error() {
        let err = AccountId::from_json(&ctx(), &json!("not-an-address")).unwrap_err();
        assert!(matches!(err, CodecError::InvalidAddress(_)));
    }

    #[test]
    fn zero_length_prefix_is_zero_account() {
        let mut p = BinaryParser::new(&[]);
        assert_eq!(AccountId::from_parser(&mut p, Some(0)).unwrap(), AccountId::ZERO);
    }
}
