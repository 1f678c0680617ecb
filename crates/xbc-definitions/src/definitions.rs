use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::enums::{EnumKind, EnumTable};
use crate::error::{DefinitionsError, DefinitionsResult};
use crate::field::{ordinal, FieldInfo};

const BUNDLED: &str = include_str!("definitions.json");

static GLOBAL: OnceLock<Definitions> = OnceLock::new();

#[derive(Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawDefinitions {
    types: HashMap<String, i64>,
    ledger_entry_types: HashMap<String, i64>,
    fields: Vec<(String, RawField)>,
    transaction_results: HashMap<String, i64>,
    transaction_types: HashMap<String, i64>,
}

#[derive(Deserialize)]
struct RawField {
    nth: i64,
    #[serde(rename = "isVLEncoded")]
    is_vl_encoded: bool,
    #[serde(rename = "isSerialized")]
    is_serialized: bool,
    #[serde(rename = "isSigningField")]
    is_signing_field: bool,
    #[serde(rename = "type")]
    type_name: String,
}

/// The loaded registry: fields by name and by ordinal, plus the enum tables.
#[derive(Debug)]
pub struct Definitions {
    fields: Vec<FieldInfo>,
    by_name: HashMap<String, usize>,
    by_ordinal: HashMap<u32, usize>,
    types: HashMap<String, i64>,
    transaction_types: EnumTable,
    ledger_entry_types: EnumTable,
    transaction_results: EnumTable,
}

impl Definitions {
    /// The registry built from the bundled `definitions.json`.
    pub fn global() -> &'static Definitions {
        GLOBAL.get_or_init(|| {
            Self::from_json(BUNDLED).expect("bundled definitions.json is well-formed")
        })
    }

    /// Build a registry from a `definitions.json` document.
    ///
    /// Placeholder entries with negative codes (`Generic`, `Invalid`) are not
    /// addressable and are dropped.
    pub fn from_json(json: &str) -> DefinitionsResult<Self> {
        let raw: RawDefinitions = serde_json::from_str(json)?;

        let mut fields = Vec::with_capacity(raw.fields.len());
        let mut by_name = HashMap::new();
        let mut by_ordinal: HashMap<u32, usize> = HashMap::new();

        for (name, info) in raw.fields {
            let type_code = *raw.types.get(&info.type_name).ok_or_else(|| {
                DefinitionsError::UnknownType {
                    field: name.clone(),
                    type_name: info.type_name.clone(),
                }
            })?;
            let (Ok(type_code), Ok(nth)) = (u16::try_from(type_code), u16::try_from(info.nth))
            else {
                tracing::debug!(field = %name, "skipping placeholder field");
                continue;
            };

            if by_name.contains_key(&name) {
                return Err(DefinitionsError::DuplicateName(name));
            }
            let idx = fields.len();
            if info.is_serialized {
                let ord = ordinal(type_code, nth);
                if let Some(&prev) = by_ordinal.get(&ord) {
                    let first: &FieldInfo = &fields[prev];
                    return Err(DefinitionsError::DuplicateOrdinal {
                        first: first.name.clone(),
                        second: name,
                        ordinal: ord,
                    });
                }
                by_ordinal.insert(ord, idx);
            }
            by_name.insert(name.clone(), idx);
            fields.push(FieldInfo::new(
                name,
                info.type_name,
                type_code,
                nth,
                info.is_vl_encoded,
                info.is_serialized,
                info.is_signing_field,
            ));
        }

        let defs = Self {
            fields,
            by_name,
            by_ordinal,
            types: raw.types,
            transaction_types: EnumTable::new(EnumKind::TransactionType, raw.transaction_types),
            ledger_entry_types: EnumTable::new(EnumKind::LedgerEntryType, raw.ledger_entry_types),
            transaction_results: EnumTable::new(
                EnumKind::TransactionResult,
                raw.transaction_results,
            ),
        };
        tracing::debug!(
            fields = defs.fields.len(),
            transaction_types = defs.transaction_types.len(),
            ledger_entry_types = defs.ledger_entry_types.len(),
            transaction_results = defs.transaction_results.len(),
            "loaded definitions"
        );
        Ok(defs)
    }

    /// Look up a field by its JSON key.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.by_name.get(name).map(|&i| &self.fields[i])
    }

    /// Look up a serialized field by its `(type code, nth)` pair.
    pub fn field_by_ordinal(&self, type_code: u16, nth: u16) -> Option<&FieldInfo> {
        self.by_ordinal
            .get(&ordinal(type_code, nth))
            .map(|&i| &self.fields[i])
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldInfo> {
        self.fields.iter()
    }

    /// Numeric code of a serialized type name.
    pub fn type_code(&self, type_name: &str) -> Option<i64> {
        self.types.get(type_name).copied()
    }

    pub fn enum_table(&self, kind: EnumKind) -> &EnumTable {
        match kind {
            EnumKind::TransactionType => &self.transaction_types,
            EnumKind::LedgerEntryType => &self.ledger_entry_types,
            EnumKind::TransactionResult => &self.transaction_results,
        }
    }

    pub fn transaction_types(&self) -> &EnumTable {
        &self.transaction_types
    }

    pub fn ledger_entry_types(&self) -> &EnumTable {
        &self.ledger_entry_types
    }

    pub fn transaction_results(&self) -> &EnumTable {
        &self.transaction_results
    }
}
