use serde_json::Value;
use xbc_binary::{
    binary_to_json, multi_signing_data, quality, serialize_object, signing_claim_data,
    signing_data, ClaimRequest, CodecContext, SerializeOptions,
};
use xbc_crypto::HashPrefix;
use xbc_definitions::Definitions;
use xbc_ledger::LedgerHeader;
use xbc_types::{CodecError, Hash256};

use crate::error::{ApiError, ApiResult};

fn from_hex(text: &str) -> ApiResult<Vec<u8>> {
    hex::decode(text).map_err(|e| CodecError::InvalidHex(format!("{e}: {text:?}")).into())
}

/// Hex-in, hex-out codec bound to one registry and address codec.
#[derive(Clone, Copy, Debug)]
pub struct BinaryCodec<'a> {
    ctx: CodecContext<'a>,
}

impl BinaryCodec<'static> {
    /// Codec over the bundled definitions.
    pub fn standard() -> Self {
        Self::new(CodecContext::standard())
    }
}

impl Default for BinaryCodec<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> BinaryCodec<'a> {
    pub fn new(ctx: CodecContext<'a>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &CodecContext<'a> {
        &self.ctx
    }

    pub fn definitions(&self) -> &'a Definitions {
        self.ctx.definitions
    }

    // ---- Objects ----

    pub fn decode(&self, hex: &str) -> ApiResult<Value> {
        let bytes = from_hex(hex)?;
        Ok(binary_to_json(&self.ctx, &bytes)?)
    }

    pub fn encode(&self, json: &Value) -> ApiResult<String> {
        let bytes = serialize_object(&self.ctx, json, SerializeOptions::default())?;
        Ok(hex::encode_upper(bytes))
    }

    // ---- Signing ----

    pub fn encode_for_signing(&self, json: &Value) -> ApiResult<String> {
        Ok(hex::encode_upper(signing_data(&self.ctx, json)?))
    }

    pub fn encode_for_signing_claim(&self, json: &Value) -> ApiResult<String> {
        let claim: ClaimRequest = serde_json::from_value(json.clone())
            .map_err(|e| ApiError::InvalidRequest(format!("payment channel claim: {e}")))?;
        Ok(hex::encode_upper(signing_claim_data(&claim)?))
    }

    pub fn encode_for_multisigning(&self, json: &Value, signer: &str) -> ApiResult<String> {
        Ok(hex::encode_upper(multi_signing_data(&self.ctx, json, signer)?))
    }

    // ---- Quality ----

    pub fn encode_quality(&self, value: &str) -> ApiResult<String> {
        Ok(hex::encode_upper(quality::encode_quality(value)?))
    }

    /// Decode the quality held in the last 8 bytes of a book directory index.
    pub fn decode_quality(&self, hex: &str) -> ApiResult<String> {
        let bytes = from_hex(hex)?;
        Ok(quality::decode_quality(&bytes)?.to_string())
    }

    // ---- Hashes ----

    pub fn decode_ledger_data(&self, hex: &str) -> ApiResult<LedgerHeader> {
        let bytes = from_hex(hex)?;
        Ok(xbc_ledger::decode_ledger_data(&bytes)?)
    }

    pub fn transaction_id(&self, hex: &str) -> ApiResult<Hash256> {
        let bytes = from_hex(hex)?;
        Ok(HashPrefix::TRANSACTION_ID.hash(&bytes))
    }

    pub fn ledger_hash(&self, header: &LedgerHeader) -> ApiResult<Hash256> {
        Ok(xbc_ledger::ledger_hash(header)?)
    }

    pub fn transaction_tree_hash(&self, transactions: &[Value]) -> ApiResult<Hash256> {
        Ok(xbc_ledger::transaction_tree_hash(&self.ctx, transactions)?)
    }

    pub fn account_state_hash(&self, entries: &[Value]) -> ApiResult<Hash256> {
        Ok(xbc_ledger::account_state_hash(&self.ctx, entries)?)
    }
}
