use serde_json::{Map, Value};
use xbc_types::{AccountId, BytesSink, CodecError, CodecResult};

use super::account_id::parse_account;
use super::currency::Currency;
use super::{expect_str, SerializedType};
use crate::context::CodecContext;
use crate::decimal::Decimal;
use crate::parser::BinaryParser;

/// Largest native amount, in drops.
pub const MAX_DROPS: u64 = 100_000_000_000_000_000;
pub const MIN_IOU_EXPONENT: i64 = -96;
pub const MAX_IOU_EXPONENT: i64 = 80;

const NOT_NATIVE: u8 = 0x80;
const POSITIVE: u8 = 0x40;
const EXPONENT_BIAS: i64 = 97;
const ZERO_ISSUED: u64 = 0x8000_0000_0000_0000;

/// Native drops or an issued-currency value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Amount {
    /// Signed drop count. The wire form keeps a sign bit and 62 magnitude bits.
    Native { negative: bool, drops: u64 },
    Issued(IssuedAmount),
}

/// Issued amount: 8-byte value, currency, issuer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuedAmount {
    pub value: [u8; 8],
    pub currency: Currency,
    pub issuer: AccountId,
}

fn invalid(msg: impl Into<String>) -> CodecError {
    CodecError::InvalidAmount(msg.into())
}

fn precision_error(value: &str) -> CodecError {
    CodecError::OutOfRange {
        type_name: "Amount",
        value: value.to_string(),
    }
}

impl Amount {
    /// Parse a drop count: decimal digits only, at most [`MAX_DROPS`].
    pub fn native(text: &str) -> CodecResult<Self> {
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(format!("native amount must be a whole number of drops: {text:?}")));
        }
        let drops: u64 = text.parse().map_err(|_| precision_error(text))?;
        if drops > MAX_DROPS {
            return Err(precision_error(text));
        }
        Ok(Self::Native {
            negative: false,
            drops,
        })
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native { .. })
    }
}

/// Encode a decimal value into the 8-byte issued-value form.
pub fn encode_issued_value(text: &str) -> CodecResult<[u8; 8]> {
    let value: Decimal = text.parse()?;
    if value.is_zero() {
        return Ok(ZERO_ISSUED.to_be_bytes());
    }
    let (mantissa, exponent) = value
        .to_mantissa_16()
        .ok_or_else(|| precision_error(text))?;
    if !(MIN_IOU_EXPONENT..=MAX_IOU_EXPONENT).contains(&exponent) {
        return Err(precision_error(text));
    }
    let mut bytes = mantissa.to_be_bytes();
    let exponent_byte = (exponent + EXPONENT_BIAS) as u8;
    bytes[0] |= NOT_NATIVE;
    if !value.is_negative() {
        bytes[0] |= POSITIVE;
    }
    bytes[0] |= exponent_byte >> 2;
    bytes[1] |= (exponent_byte & 0x03) << 6;
    Ok(bytes)
}

/// Decode the 8-byte issued-value form.
pub fn decode_issued_value(bytes: &[u8; 8]) -> Decimal {
    let negative = bytes[0] & POSITIVE == 0;
    let exponent = (((bytes[0] & 0x3f) as i64) << 2) + ((bytes[1] >> 6) as i64) - EXPONENT_BIAS;
    let mut mantissa = *bytes;
    mantissa[0] = 0;
    mantissa[1] &= 0x3f;
    Decimal::from_parts(negative, u64::from_be_bytes(mantissa), exponent as i32)
}

impl IssuedAmount {
    pub fn value(&self) -> Decimal {
        decode_issued_value(&self.value)
    }

    fn from_map(ctx: &CodecContext<'_>, map: &Map<String, Value>) -> CodecResult<Self> {
        let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
        keys.sort_unstable();
        if keys != ["currency", "issuer", "value"] {
            return Err(invalid(format!(
                "issued amount needs exactly currency, issuer and value, got {keys:?}"
            )));
        }
        let value = match &map["value"] {
            Value::String(s) => encode_issued_value(s)?,
            Value::Number(n) => encode_issued_value(&n.to_string())?,
            other => return Err(invalid(format!("issued value must be a string, got {other}"))),
        };
        Ok(Self {
            value,
            currency: Currency::parse(expect_str(&map["currency"], "currency")?)?,
            issuer: parse_account(ctx, expect_str(&map["issuer"], "issuer")?)?,
        })
    }
}

impl SerializedType for Amount {
    fn from_json(ctx: &CodecContext<'_>, value: &Value) -> CodecResult<Self> {
        match value {
            Value::String(text) => Self::native(text),
            Value::Object(map) => IssuedAmount::from_map(ctx, map).map(Self::Issued),
            other => Err(invalid(format!("expected a drops string or an object, got {other}"))),
        }
    }

    fn from_parser(parser: &mut BinaryParser<'_>, _size: Option<usize>) -> CodecResult<Self> {
        if parser.peek()? & NOT_NATIVE == 0 {
            let raw = parser.read_u64()?;
            return Ok(Self::Native {
                negative: (raw >> 56) as u8 & POSITIVE == 0,
                drops: raw & 0x3FFF_FFFF_FFFF_FFFF,
            });
        }
        let value = parser.read_array()?;
        let currency = Currency::from_parser(parser, None)?;
        let issuer: [u8; 20] = parser.read_array()?;
        Ok(Self::Issued(IssuedAmount {
            value,
            currency,
            issuer: AccountId::from_bytes(issuer),
        }))
    }

    fn write_to(&self, sink: &mut dyn BytesSink) {
        match self {
            Self::Native { negative, drops } => {
                let mut raw = *drops & 0x3FFF_FFFF_FFFF_FFFF;
                if !negative {
                    raw |= (POSITIVE as u64) << 56;
                }
                sink.put(&raw.to_be_bytes());
            }
            Self::Issued(issued) => {
                sink.put(&issued.value);
                sink.put(issued.currency.as_bytes());
                sink.put(issued.issuer.as_bytes());
            }
        }
    }

    fn to_json(&self, ctx: &CodecContext<'_>) -> Value {
        match self {
            Self::Native { negative, drops } => {
                let sign = if *negative { "-" } else { "" };
                Value::String(format!("{sign}{drops}"))
            }
            Self::Issued(issued) => {
                let mut map = Map::new();
                map.insert("currency".into(), issued.currency.to_json(ctx));
                map.insert("issuer".into(), issued.issuer.to_json(ctx));
                map.insert("value".into(), Value::String(issued.value().to_string()));
                Value::Object(map)
            }
        }
    }
}
