use thiserror::Error;

/// Broad class of a [`CodecError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown field name, ordinal, type or enum value.
    Lookup,
    /// Malformed bytes, hex or logical values.
    Format,
    /// Well-formed input whose parts contradict each other.
    Semantic,
    /// A length or number outside the encodable range.
    Range,
}

/// Errors produced while encoding, decoding or hashing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("unknown field ordinal: type code {type_code}, nth {nth}")]
    UnknownOrdinal { type_code: u16, nth: u16 },

    #[error("unknown type: {0}")]
    UnknownType(String),

    #[error("unknown {table} value: {value}")]
    UnknownEnumValue { table: &'static str, value: String },

    #[error("field {0} has no serializable type")]
    UnsupportedField(String),

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEnd { needed: usize, remaining: usize },

    #[error("invalid variable length indicator: {0:#04x}")]
    InvalidLengthPrefix(u8),

    #[error("invalid field header: {0}")]
    InvalidFieldHeader(String),

    #[error("objects and arrays nested deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error("invalid currency: {0}")]
    InvalidCurrency(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("cannot have both an X-address on {field} and an explicit {tag_field}")]
    TagConflict { field: String, tag_field: String },

    #[error("{0} cannot have an associated tag")]
    UnexpectedTag(String),

    #[error("SigningPubKey must be an empty string when multisigning")]
    SigningPubKeyNotEmpty,

    #[error("invalid path step flags: {0:#04x}")]
    InvalidPathStep(u8),

    #[error("length {length} exceeds the maximum encodable length {max}")]
    LengthOverflow { length: usize, max: usize },

    #[error("value {value} out of range for {type_name}")]
    OutOfRange { type_name: &'static str, value: String },
}

impl CodecError {
    /// The taxonomy class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownField(_)
            | Self::UnknownOrdinal { .. }
            | Self::UnknownType(_)
            | Self::UnknownEnumValue { .. }
            | Self::UnsupportedField(_) => ErrorKind::Lookup,
            Self::InvalidHex(_)
            | Self::InvalidLength { .. }
            | Self::UnexpectedEnd { .. }
            | Self::InvalidLengthPrefix(_)
            | Self::InvalidFieldHeader(_)
            | Self::NestingTooDeep(_)
            | Self::InvalidCurrency(_)
            | Self::InvalidAmount(_)
            | Self::InvalidAddress(_)
            | Self::InvalidValue { .. } => ErrorKind::Format,
            Self::TagConflict { .. }
            | Self::UnexpectedTag(_)
            | Self::SigningPubKeyNotEmpty
            | Self::InvalidPathStep(_) => ErrorKind::Semantic,
            Self::LengthOverflow { .. } | Self::OutOfRange { .. } => ErrorKind::Range,
        }
    }

    /// Shorthand for [`CodecError::InvalidValue`].
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_cover_taxonomy() {
        assert_eq!(CodecError::UnknownField("Foo".into()).kind(), ErrorKind::Lookup);
        assert_eq!(
            CodecError::InvalidLength { expected: 16, actual: 15 }.kind(),
            ErrorKind::Format
        );
        assert_eq!(CodecError::SigningPubKeyNotEmpty.kind(), ErrorKind::Semantic);
        assert_eq!(
            CodecError::LengthOverflow { length: 918_745, max: 918_744 }.kind(),
            ErrorKind::Range
        );
    }

    #[test]
    fn length_error_reports_expected_and_actual() {
        let err = CodecError::InvalidLength { expected: 16, actual: 15 };
        assert_eq!(err.to_string(), "invalid byte length: expected 16, got 15");
    }
}
