use serde_json::{Map, Value};
use xbc_types::{AccountId, BytesSink, CodecError, CodecResult};

use super::account_id::parse_account;
use super::currency::Currency;
use super::{expect_str, SerializedType};
use crate::context::CodecContext;
use crate::parser::BinaryParser;

const TYPE_ACCOUNT: u8 = 0x01;
const TYPE_CURRENCY: u8 = 0x10;
const TYPE_ISSUER: u8 = 0x20;
const PATH_SEPARATOR: u8 = 0xFF;
const PATHSET_END: u8 = 0x00;

/// One step of a payment path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathHop {
    pub account: Option<AccountId>,
    pub currency: Option<Currency>,
    pub issuer: Option<AccountId>,
}

/// An ordered list of hops.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(pub Vec<PathHop>);

/// Alternative payment paths.
///
/// Wire form: each hop is a type byte followed by the fields it flags;
/// paths are separated by `0xFF` and the set ends with `0x00`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathSet(pub Vec<Path>);

impl PathHop {
    fn type_byte(&self) -> u8 {
        let mut t = 0;
        if self.account.is_some() {
            t |= TYPE_ACCOUNT;
        }
        if self.currency.is_some() {
            t |= TYPE_CURRENCY;
        }
        if self.issuer.is_some() {
            t |= TYPE_ISSUER;
        }
        t
    }

    /// Keys other than `account`, `currency` and `issuer` are ignored.
    fn from_map(ctx: &CodecContext<'_>, map: &Map<String, Value>) -> CodecResult<Self> {
        let account = map
            .get("account")
            .map(|v| parse_account(ctx, expect_str(v, "account")?))
            .transpose()?;
        let currency = map
            .get("currency")
            .map(|v| Currency::parse(expect_str(v, "currency")?))
            .transpose()?;
        let issuer = map
            .get("issuer")
            .map(|v| parse_account(ctx, expect_str(v, "issuer")?))
            .transpose()?;
        Ok(Self {
            account,
            currency,
            issuer,
        })
    }

    fn from_parser(parser: &mut BinaryParser<'_>) -> CodecResult<Self> {
        let t = parser.read_u8()?;
        if t & !(TYPE_ACCOUNT | TYPE_CURRENCY | TYPE_ISSUER) != 0 {
            return Err(CodecError::InvalidPathStep(t));
        }
        let mut hop = Self::default();
        if t & TYPE_ACCOUNT != 0 {
            hop.account = Some(AccountId::from_bytes(parser.read_array()?));
        }
        if t & TYPE_CURRENCY != 0 {
            hop.currency = Some(Currency::from_bytes(parser.read_array()?));
        }
        if t & TYPE_ISSUER != 0 {
            hop.issuer = Some(AccountId::from_bytes(parser.read_array()?));
        }
        Ok(hop)
    }

    fn write_to(&self, sink: &mut dyn BytesSink) {
        sink.put(&[self.type_byte()]);
        if let Some(account) = &self.account {
            sink.put(account.as_bytes());
        }
        if let Some(currency) = &self.currency {
            sink.put(currency.as_bytes());
        }
        if let Some(issuer) = &self.issuer {
            sink.put(issuer.as_bytes());
        }
    }

    fn to_json(&self, ctx: &CodecContext<'_>) -> Value {
        let mut map = Map::new();
        if let Some(account) = &self.account {
            map.insert("account".into(), account.to_json(ctx));
        }
        if let Some(currency) = &self.currency {
            map.insert("currency".into(), currency.to_json(ctx));
        }
        if let Some(issuer) = &self.issuer {
            map.insert("issuer".into(), issuer.to_json(ctx));
        }
        Value::Object(map)
    }
}

fn expect_array<'v>(value: &'v Value, what: &str) -> CodecResult<&'v Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| CodecError::invalid_value(what, format!("expected an array, got {value}")))
}

impl SerializedType for PathSet {
    fn from_json(ctx: &CodecContext<'_>, value: &Value) -> CodecResult<Self> {
        let paths = expect_array(value, "PathSet")?
            .iter()
            .map(|path| {
                expect_array(path, "Path")?
                    .iter()
                    .map(|hop| match hop {
                        Value::Object(map) => PathHop::from_map(ctx, map),
                        other => Err(CodecError::invalid_value(
                            "PathHop",
                            format!("expected an object, got {other}"),
                        )),
                    })
                    .collect::<CodecResult<Vec<_>>>()
                    .map(Path)
            })
            .collect::<CodecResult<Vec<_>>>()?;
        Ok(Self(paths))
    }

    fn from_parser(parser: &mut BinaryParser<'_>, _size: Option<usize>) -> CodecResult<Self> {
        let mut paths = Vec::new();
        let mut hops = Vec::new();
        loop {
            match parser.peek()? {
                PATHSET_END => {
                    parser.skip(1)?;
                    if !hops.is_empty() || !paths.is_empty() {
                        paths.push(Path(hops));
                    }
                    return Ok(Self(paths));
                }
                PATH_SEPARATOR => {
                    parser.skip(1)?;
                    paths.push(Path(std::mem::take(&mut hops)));
                }
                _ => hops.push(PathHop::from_parser(parser)?),
            }
        }
    }

    fn write_to(&self, sink: &mut dyn BytesSink) {
        for (i, path) in self.0.iter().enumerate() {
            if i > 0 {
                sink.put(&[PATH_SEPARATOR]);
            }
            for hop in &path.0 {
                hop.write_to(sink);
            }
        }
        sink.put(&[PATHSET_END]);
    }

    fn to_json(&self, ctx: &CodecContext<'_>) -> Value {
        Value::Array(
            self.0
                .iter()
                .map(|path| Value::Array(path.0.iter().map(|hop| hop.to_json(ctx)).collect()))
                .collect(),
        )
    }
}
