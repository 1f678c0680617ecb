use sha2::{Digest, Sha512};
use xbc_types::{BytesSink, Hash256};

use crate::prefix::HashPrefix;

/// Incremental SHA-512 truncated to its first 256 bits.
///
/// Implements [`BytesSink`], so serializers can stream straight into it.
#[derive(Clone, Default)]
pub struct Sha512Half {
    inner: Sha512,
}

impl Sha512Half {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hasher already fed with `prefix`.
    pub fn with_prefix(prefix: HashPrefix) -> Self {
        let mut hasher = Self::new();
        hasher.update(&prefix.bytes());
        hasher
    }

    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Consume the hasher and return the truncated digest.
    pub fn finish(self) -> Hash256 {
        let full = self.inner.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&full[..32]);
        Hash256::from_array(out)
    }

    /// One-shot digest of `data`.
    pub fn digest(data: &[u8]) -> Hash256 {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finish()
    }
}

impl BytesSink for Sha512Half {
    fn put(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_vector() {
        // First half of SHA-512("").
        assert_eq!(
            Sha512Half::digest(b"").to_hex(),
            "CF83E1357EEFB8BDF1542850D66D8007D620E4050B5715DC83F4A921D36CE9CE"
        );
    }

    #[test]
    fn incremental_matches_one_shot() {
        let mut h = Sha512Half::new();
        h.put(b"hello ");
        h.put(b"world");
        assert_eq!(h.finish(), Sha512Half::digest(b"hello world"));
    }

    #[test]
    fn prefix_is_fed_first() {
        let mut data = HashPrefix::TRANSACTION_ID.bytes().to_vec();
        data.extend_from_slice(b"payload");
        let mut h = Sha512Half::with_prefix(HashPrefix::TRANSACTION_ID);
        h.update(b"payload");
        assert_eq!(h.finish(), Sha512Half::digest(&data));
    }
}
