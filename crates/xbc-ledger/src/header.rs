use serde::{Deserialize, Serialize};
use xbc_binary::BinaryParser;
use xbc_types::{BytesSink, Hash256};

use crate::error::{LedgerError, LedgerResult};

/// A ledger header in its JSON shape.
///
/// Integer fields accept either JSON numbers or decimal strings, since
/// `total_coins` routinely exceeds what JSON numbers carry exactly. Unknown
/// keys (`hash`, `closed`, `accepted`, ...) are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerHeader {
    #[serde(deserialize_with = "number::int")]
    pub ledger_index: u32,
    #[serde(
        deserialize_with = "number::int",
        serialize_with = "number::decimal_string"
    )]
    pub total_coins: u64,
    pub parent_hash: Hash256,
    pub transaction_hash: Hash256,
    pub account_hash: Hash256,
    #[serde(
        default,
        deserialize_with = "number::opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent_close_time: Option<u32>,
    #[serde(deserialize_with = "number::int")]
    pub close_time: u32,
    #[serde(deserialize_with = "number::int")]
    pub close_time_resolution: u8,
    #[serde(
        default,
        deserialize_with = "number::opt_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub close_flags: Option<u8>,
}

impl LedgerHeader {
    /// Write the hashed form of the header, without its prefix.
    ///
    /// `parent_close_time` and `close_flags` must be present.
    pub fn write_to(&self, sink: &mut dyn BytesSink) -> LedgerResult<()> {
        let parent_close_time = self
            .parent_close_time
            .ok_or(LedgerError::MissingField("parent_close_time"))?;
        let close_flags = self
            .close_flags
            .ok_or(LedgerError::MissingField("close_flags"))?;

        sink.put(&self.ledger_index.to_be_bytes());
        sink.put(&self.total_coins.to_be_bytes());
        sink.put(self.parent_hash.as_bytes());
        sink.put(self.transaction_hash.as_bytes());
        sink.put(self.account_hash.as_bytes());
        sink.put(&parent_close_time.to_be_bytes());
        sink.put(&self.close_time.to_be_bytes());
        sink.put(&[self.close_time_resolution, close_flags]);
        Ok(())
    }
}

/// Parse a serialized ledger header. The hash is not checked.
pub fn decode_ledger_data(bytes: &[u8]) -> LedgerResult<LedgerHeader> {
    let mut parser = BinaryParser::new(bytes);
    Ok(LedgerHeader {
        ledger_index: parser.read_u32()?,
        total_coins: parser.read_u64()?,
        parent_hash: Hash256::from_array(parser.read_array()?),
        transaction_hash: Hash256::from_array(parser.read_array()?),
        account_hash: Hash256::from_array(parser.read_array()?),
        parent_close_time: Some(parser.read_u32()?),
        close_time: parser.read_u32()?,
        close_time_resolution: parser.read_u8()?,
        close_flags: Some(parser.read_u8()?),
    })
}

mod number {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    fn convert<T: TryFrom<u64>, E: Error>(raw: Raw) -> Result<T, E> {
        let n = match raw {
            Raw::Number(n) => n,
            Raw::Text(text) => text
                .parse()
                .map_err(|_| E::custom(format!("not an unsigned integer: {text:?}")))?,
        };
        T::try_from(n).map_err(|_| E::custom(format!("integer out of range: {n}")))
    }

    pub fn int<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        convert(Raw::deserialize(deserializer)?)
    }

    pub fn opt_int<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: TryFrom<u64>,
    {
        Option::<Raw>::deserialize(deserializer)?
            .map(convert)
            .transpose()
    }

    pub fn decimal_string<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }
}
