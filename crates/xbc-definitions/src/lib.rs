//! Field, type and enum registry for the XAH binary codec.
//!
//! Every serialized field is identified by a `(type code, nth)` pair. This
//! crate loads the registry from a `definitions.json` document (the bundled
//! one by default, see [`Definitions::global`]) and derives for each field its
//! canonical sort ordinal, its wire header, and the codec that handles its
//! values.

pub mod definitions;
pub mod enums;
pub mod error;
pub mod field;

pub use definitions::Definitions;
pub use enums::{EnumKind, EnumTable};
pub use error::{DefinitionsError, DefinitionsResult};
pub use field::{field_header, FieldInfo, FieldKind};
