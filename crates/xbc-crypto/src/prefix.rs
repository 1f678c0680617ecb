use xbc_types::Hash256;

use crate::hasher::Sha512Half;

/// Four-byte namespace prepended to data before hashing or signing.
///
/// Each prefix is three ASCII letters followed by a zero byte, so identical
/// bytes hashed under different prefixes never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HashPrefix {
    name: &'static str,
    bytes: [u8; 4],
}

impl HashPrefix {
    /// `TXN`: transaction id, over the fully signed transaction.
    pub const TRANSACTION_ID: Self = Self::new("transactionID", *b"TXN");
    /// `SND`: transaction plus metadata, in a transaction tree leaf.
    pub const TRANSACTION_NODE: Self = Self::new("transaction", *b"SND");
    /// `MLN`: account state entry leaf.
    pub const ACCOUNT_STATE_ENTRY: Self = Self::new("accountStateEntry", *b"MLN");
    /// `MIN`: SHAMap inner node.
    pub const INNER_NODE: Self = Self::new("innerNode", *b"MIN");
    /// `LWR`: ledger header.
    pub const LEDGER_HEADER: Self = Self::new("ledgerHeader", *b"LWR");
    /// `STX`: single-signature signing data.
    pub const TRANSACTION_SIG: Self = Self::new("transactionSig", *b"STX");
    /// `SMT`: multi-signature signing data.
    pub const TRANSACTION_MULTI_SIG: Self = Self::new("transactionMultiSig", *b"SMT");
    /// `VAL`: validation.
    pub const VALIDATION: Self = Self::new("validation", *b"VAL");
    /// `PRP`: proposal.
    pub const PROPOSAL: Self = Self::new("proposal", *b"PRP");
    /// `CLM`: payment channel claim.
    pub const PAYMENT_CHANNEL_CLAIM: Self = Self::new("paymentChannelClaim", *b"CLM");

    /// Every known prefix.
    pub const ALL: [Self; 10] = [
        Self::TRANSACTION_ID,
        Self::TRANSACTION_NODE,
        Self::ACCOUNT_STATE_ENTRY,
        Self::INNER_NODE,
        Self::LEDGER_HEADER,
        Self::TRANSACTION_SIG,
        Self::TRANSACTION_MULTI_SIG,
        Self::VALIDATION,
        Self::PROPOSAL,
        Self::PAYMENT_CHANNEL_CLAIM,
    ];

    const fn new(name: &'static str, tag: [u8; 3]) -> Self {
        Self {
            name,
            bytes: [tag[0], tag[1], tag[2], 0],
        }
    }

    /// Look up a prefix by its camel-case name (e.g. `"innerNode"`).
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name == name)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn bytes(&self) -> [u8; 4] {
        self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.bytes)
    }

    /// SHA-512-Half of `prefix || data`.
    pub fn hash(&self, data: &[u8]) -> Hash256 {
        let mut hasher = Sha512Half::with_prefix(*self);
        hasher.update(data);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values() {
        assert_eq!(HashPrefix::TRANSACTION_ID.bytes(), [0x54, 0x58, 0x4E, 0x00]);
        assert_eq!(HashPrefix::TRANSACTION_NODE.to_hex(), "534E4400");
        assert_eq!(HashPrefix::ACCOUNT_STATE_ENTRY.to_hex(), "4D4C4E00");
        assert_eq!(HashPrefix::INNER_NODE.to_hex(), "4D494E00");
        assert_eq!(HashPrefix::LEDGER_HEADER.to_hex(), "4C575200");
        assert_eq!(HashPrefix::TRANSACTION_SIG.to_hex(), "53545800");
        assert_eq!(HashPrefix::TRANSACTION_MULTI_SIG.to_hex(), "534D5400");
        assert_eq!(HashPrefix::VALIDATION.to_hex(), "56414C00");
        assert_eq!(HashPrefix::PROPOSAL.to_hex(), "50525000");
        assert_eq!(HashPrefix::PAYMENT_CHANNEL_CLAIM.to_hex(), "434C4D00");
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(HashPrefix::by_name("innerNode"), Some(HashPrefix::INNER_NODE));
        assert_eq!(HashPrefix::by_name("nope"), None);
    }

    #[test]
    fn prefixes_separate_domains() {
        let a = HashPrefix::TRANSACTION_ID.hash(b"same");
        let b = HashPrefix::TRANSACTION_NODE.hash(b"same");
        assert_ne!(a, b);
    }
}
