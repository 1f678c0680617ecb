use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CodecError, CodecResult};

/// Opaque fixed-width hash of `N` bytes.
///
/// Hashes compare lexicographically by their bytes and render as uppercase
/// hex, which is also their serde representation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash<const N: usize>([u8; N]);

/// 128-bit hash (e.g. `EmailHash`).
pub type Hash128 = Hash<16>;
/// 160-bit hash (e.g. `TakerPaysCurrency`).
pub type Hash160 = Hash<20>;
/// 256-bit hash (transaction ids, ledger indexes, SHAMap node hashes).
pub type Hash256 = Hash<32>;

impl<const N: usize> Hash<N> {
    /// Width in bytes.
    pub const WIDTH: usize = N;

    /// The all-zero hash.
    pub const ZERO: Self = Self([0u8; N]);

    /// Wrap a byte array.
    pub const fn from_array(bytes: [u8; N]) -> Self {
        Self(bytes)
    }

    /// Copy from a slice that must be exactly `N` bytes long.
    pub fn from_slice(bytes: &[u8]) -> CodecResult<Self> {
        let arr: [u8; N] = bytes.try_into().map_err(|_| CodecError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    /// Parse from a hex string of exactly `2 * N` characters.
    pub fn from_hex(s: &str) -> CodecResult<Self> {
        if s.len() != N * 2 {
            return Err(CodecError::InvalidLength {
                expected: N,
                actual: s.len() / 2,
            });
        }
        let bytes = hex::decode(s).map_err(|e| CodecError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.0
    }

    /// Uppercase hex representation.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Returns `true` if every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// The 4-bit digit at `depth`, counting high nibble first.
    ///
    /// # Panics
    ///
    /// Panics if `depth >= 2 * N`.
    pub fn nibble(&self, depth: usize) -> u8 {
        let byte = self.0[depth / 2];
        if depth % 2 == 0 {
            byte >> 4
        } else {
            byte & 0x0f
        }
    }
}

impl<const N: usize> Default for Hash<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> fmt::Debug for Hash<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash{}({})", N * 8, self.to_hex())
    }
}

impl<const N: usize> fmt::Display for Hash<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl<const N: usize> FromStr for Hash<N> {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl<const N: usize> From<[u8; N]> for Hash<N> {
    fn from(bytes: [u8; N]) -> Self {
        Self(bytes)
    }
}

impl<const N: usize> From<Hash<N>> for [u8; N] {
    fn from(hash: Hash<N>) -> Self {
        hash.0
    }
}

impl<const N: usize> AsRef<[u8]> for Hash<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Serialize for Hash<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de, const N: usize> Deserialize<'de> for Hash<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
