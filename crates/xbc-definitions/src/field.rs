use crate::enums::EnumKind;

/// Which codec handles a field's values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Hash128,
    Hash160,
    Hash256,
    Amount,
    Blob,
    AccountId,
    StObject,
    StArray,
    PathSet,
    Vector256,
    /// Integer field whose JSON form is a name from an enum table.
    Enum(EnumKind),
    /// Registered, but no codec exists for the type (e.g. `UInt384`).
    Unsupported,
}

impl FieldKind {
    /// Resolve the codec for a field from its name and type name.
    pub fn resolve(field_name: &str, type_name: &str) -> Self {
        if let Some(kind) = EnumKind::for_field(field_name) {
            return Self::Enum(kind);
        }
        match type_name {
            "UInt8" => Self::UInt8,
            "UInt16" => Self::UInt16,
            "UInt32" => Self::UInt32,
            "UInt64" => Self::UInt64,
            "Hash128" => Self::Hash128,
            "Hash160" => Self::Hash160,
            "Hash256" => Self::Hash256,
            "Amount" => Self::Amount,
            "Blob" => Self::Blob,
            "AccountID" => Self::AccountId,
            "STObject" => Self::StObject,
            "STArray" => Self::StArray,
            "PathSet" => Self::PathSet,
            "Vector256" => Self::Vector256,
            _ => Self::Unsupported,
        }
    }
}

/// Everything the codec needs to know about one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    pub name: String,
    pub nth: u16,
    pub type_name: String,
    pub type_code: u16,
    /// `(type_code << 16) | nth`; fields serialize in ascending ordinal order.
    pub ordinal: u32,
    /// Wire header; empty for fields that are never serialized.
    pub header: Vec<u8>,
    pub is_vl_encoded: bool,
    pub is_serialized: bool,
    pub is_signing_field: bool,
    pub kind: FieldKind,
}

impl FieldInfo {
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        type_code: u16,
        nth: u16,
        is_vl_encoded: bool,
        is_serialized: bool,
        is_signing_field: bool,
    ) -> Self {
        let name = name.into();
        let type_name = type_name.into();
        let kind = FieldKind::resolve(&name, &type_name);
        let header = if is_serialized && nth <= u8::MAX as u16 && type_code <= u8::MAX as u16 {
            field_header(type_code as u8, nth as u8)
        } else {
            Vec::new()
        };
        Self {
            ordinal: ordinal(type_code, nth),
            name,
            nth,
            type_name,
            type_code,
            header,
            is_vl_encoded,
            is_serialized,
            is_signing_field,
            kind,
        }
    }
}

/// Sort key of a `(type code, nth)` pair.
pub fn ordinal(type_code: u16, nth: u16) -> u32 {
    ((type_code as u32) << 16) | nth as u32
}

/// Encode the 1-3 byte header for a `(type code, nth)` pair.
///
/// Codes below 16 pack into a nibble; larger codes take a whole byte, with a
/// zero nibble marking where they follow.
pub fn field_header(type_code: u8, nth: u8) -> Vec<u8> {
    match (type_code < 16, nth < 16) {
        (true, true) => vec![(type_code << 4) | nth],
        (true, false) => vec![type_code << 4, nth],
        (false, true) => vec![nth, type_code],
        (false, false) => vec![0, type_code, nth],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_forms() {
        assert_eq!(field_header(1, 2), vec![0x12]);
        assert_eq!(field_header(5, 20), vec![0x50, 0x14]);
        assert_eq!(field_header(16, 3), vec![0x03, 0x10]);
        assert_eq!(field_header(17, 17), vec![0x00, 0x11, 0x11]);
    }

    #[test]
    fn enum_fields_override_type() {
        assert_eq!(
            FieldKind::resolve("TransactionType", "UInt16"),
            FieldKind::Enum(EnumKind::TransactionType)
        );
        assert_eq!(
            FieldKind::resolve("TransactionResult", "UInt8"),
            FieldKind::Enum(EnumKind::TransactionResult)
        );
        assert_eq!(FieldKind::resolve("Flags", "UInt32"), FieldKind::UInt32);
        assert_eq!(FieldKind::resolve("Wide", "UInt384"), FieldKind::Unsupported);
    }

    #[test]
    fn non_serialized_fields_have_no_header() {
        let f = FieldInfo::new("hash", "Hash256", 5, 257, false, false, false);
        assert!(f.header.is_empty());
        assert_eq!(f.ordinal, (5 << 16) | 257);
    }
}
