use serde_json::Value;
use xbc_binary::{serialize_object, BinarySerializer, CodecContext, SerializeOptions};
use xbc_crypto::{HashPrefix, ShaMapItem};
use xbc_types::{BytesSink, Hash256};

use crate::error::{LedgerError, LedgerResult};

fn index_field(json: &Value, key: &'static str) -> LedgerResult<Hash256> {
    let text = json
        .get(key)
        .and_then(Value::as_str)
        .ok_or(LedgerError::MissingField(key))?;
    Ok(Hash256::from_hex(text)?)
}

/// A transaction with its metadata, as stored in a transaction tree.
///
/// Keyed by the transaction's `hash`; the leaf holds the length-prefixed
/// transaction followed by the length-prefixed `metaData`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionItem {
    bytes: Vec<u8>,
}

impl TransactionItem {
    pub fn from_json(ctx: &CodecContext<'_>, json: &Value) -> LedgerResult<(Hash256, Self)> {
        let index = index_field(json, "hash")?;
        let meta = json
            .get("metaData")
            .ok_or(LedgerError::MissingField("metaData"))?;

        let tx_bytes = serialize_object(ctx, json, SerializeOptions::default())?;
        let meta_bytes = serialize_object(ctx, meta, SerializeOptions::default())?;
        let mut bytes = Vec::with_capacity(tx_bytes.len() + meta_bytes.len() + 6);
        let mut serializer = BinarySerializer::new(&mut bytes);
        serializer.write_length_encoded(&tx_bytes)?;
        serializer.write_length_encoded(&meta_bytes)?;
        Ok((index, Self { bytes }))
    }
}

impl ShaMapItem for TransactionItem {
    fn hash_prefix(&self) -> HashPrefix {
        HashPrefix::TRANSACTION_NODE
    }

    fn write_to(&self, sink: &mut dyn BytesSink) {
        sink.put(&self.bytes);
    }
}

/// A ledger state entry, keyed by its `index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateEntryItem {
    bytes: Vec<u8>,
}

impl StateEntryItem {
    pub fn from_json(ctx: &CodecContext<'_>, json: &Value) -> LedgerResult<(Hash256, Self)> {
        let index = index_field(json, "index")?;
        let bytes = serialize_object(ctx, json, SerializeOptions::default())?;
        Ok((index, Self { bytes }))
    }
}

impl ShaMapItem for StateEntryItem {
    fn hash_prefix(&self) -> HashPrefix {
        HashPrefix::ACCOUNT_STATE_ENTRY
    }

    fn write_to(&self, sink: &mut dyn BytesSink) {
        sink.put(&self.bytes);
    }
}
