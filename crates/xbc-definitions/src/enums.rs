use std::collections::{BTreeMap, HashMap};

/// The integer fields whose JSON representation is a symbolic name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnumKind {
    TransactionType,
    LedgerEntryType,
    TransactionResult,
}

impl EnumKind {
    /// The enum carried by a field of this name, if any.
    pub fn for_field(field_name: &str) -> Option<Self> {
        match field_name {
            "TransactionType" => Some(Self::TransactionType),
            "LedgerEntryType" => Some(Self::LedgerEntryType),
            "TransactionResult" => Some(Self::TransactionResult),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::TransactionType => "TransactionType",
            Self::LedgerEntryType => "LedgerEntryType",
            Self::TransactionResult => "TransactionResult",
        }
    }

    /// Width of the encoded code in bytes.
    pub fn width(self) -> usize {
        match self {
            Self::TransactionResult => 1,
            Self::TransactionType | Self::LedgerEntryType => 2,
        }
    }
}

/// Bidirectional name <-> code table for one [`EnumKind`].
#[derive(Clone, Debug)]
pub struct EnumTable {
    kind: EnumKind,
    by_name: HashMap<String, i64>,
    by_code: BTreeMap<i64, String>,
}

impl EnumTable {
    pub fn new(kind: EnumKind, entries: impl IntoIterator<Item = (String, i64)>) -> Self {
        let mut by_name = HashMap::new();
        let mut by_code = BTreeMap::new();
        for (name, code) in entries {
            by_code.entry(code).or_insert_with(|| name.clone());
            by_name.insert(name, code);
        }
        Self {
            kind,
            by_name,
            by_code,
        }
    }

    pub fn kind(&self) -> EnumKind {
        self.kind
    }

    pub fn code(&self, name: &str) -> Option<i64> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, code: i64) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }

    /// Names with a non-negative code, in code order.
    ///
    /// Negative codes are placeholders (`Invalid`, `Any`) that never appear on
    /// the wire.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_code
            .range(0..)
            .map(|(_, name)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> EnumTable {
        EnumTable::new(
            EnumKind::TransactionType,
            [
                ("Invalid".to_string(), -1),
                ("Payment".to_string(), 0),
                ("OfferCreate".to_string(), 7),
            ],
        )
    }

    #[test]
    fn lookups_both_ways() {
        let t = table();
        assert_eq!(t.code("OfferCreate"), Some(7));
        assert_eq!(t.name(0), Some("Payment"));
        assert_eq!(t.name(99), None);
        assert_eq!(t.code("Nope"), None);
    }

    #[test]
    fn names_skip_placeholders() {
        let binding = table();
        let names: Vec<_> = binding.names().collect();
        assert_eq!(names, vec!["Payment", "OfferCreate"]);
    }

    #[test]
    fn widths() {
        assert_eq!(EnumKind::TransactionResult.width(), 1);
        assert_eq!(EnumKind::LedgerEntryType.width(), 2);
    }
}
