use thiserror::Error;

/// Errors raised while loading a definitions document.
#[derive(Debug, Error)]
pub enum DefinitionsError {
    #[error("malformed definitions document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("field {field} references unknown type {type_name}")]
    UnknownType { field: String, type_name: String },

    #[error("duplicate field name: {0}")]
    DuplicateName(String),

    #[error("fields {first} and {second} share ordinal {ordinal:#010x}")]
    DuplicateOrdinal {
        first: String,
        second: String,
        ordinal: u32,
    },
}

pub type DefinitionsResult<T> = Result<T, DefinitionsError>;
