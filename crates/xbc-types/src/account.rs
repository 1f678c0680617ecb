use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CodecResult;
use crate::hash::Hash160;

/// 160-bit account identifier.
///
/// Textual forms (classic and X-addresses) live in `xbc-address`; this type
/// only carries the raw identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Hash160);

impl AccountId {
    /// The zero account (`rrrrrrrrrrrrrrrrrrrrrhoLvTp`).
    pub const ZERO: Self = Self(Hash160::ZERO);

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(Hash160::from_array(bytes))
    }

    pub fn from_slice(bytes: &[u8]) -> CodecResult<Self> {
        Hash160::from_slice(bytes).map(Self)
    }

    /// Parse from 40 hex characters.
    pub fn from_hex(s: &str) -> CodecResult<Self> {
        Hash160::from_hex(s).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        self.0.as_bytes()
    }

    pub fn as_hash(&self) -> &Hash160 {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.0.to_hex())
    }
}

impl From<Hash160> for AccountId {
    fn from(hash: Hash160) -> Self {
        Self(hash)
    }
}

impl From<[u8; 20]> for AccountId {
    fn from(bytes: [u8; 20]) -> Self {
        Self::from_bytes(bytes)
    }
}
