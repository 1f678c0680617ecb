//! Foundation types for the XAH binary codec (XBC).
//!
//! This crate holds the leaf-level building blocks shared by every other XBC
//! crate: the width-parameterized [`Hash`] family, the [`AccountId`]
//! identifier, the [`BytesSink`] abstraction written to by both the
//! serializer and the hasher, and the [`CodecError`] taxonomy.
//!
//! # Key Types
//!
//! - [`Hash128`], [`Hash160`], [`Hash256`]: opaque fixed-width hashes
//! - [`AccountId`]: 160-bit account identifier
//! - [`BytesSink`]: append-only byte destination
//! - [`CodecError`] / [`ErrorKind`]: the error taxonomy

pub mod account;
pub mod error;
pub mod hash;
pub mod sink;

pub use account::AccountId;
pub use error::{CodecError, CodecResult, ErrorKind};
pub use hash::{Hash, Hash128, Hash160, Hash256};
pub use sink::BytesSink;
