//! Hashing primitives for the XAH binary codec.
//!
//! Provides the ledger's hash function (the first half of SHA-512), the
//! four-byte [`HashPrefix`] namespaces that separate what is being hashed,
//! and the [`ShaMap`] radix-16 tree whose root commits to a ledger's
//! transaction and state sets.

pub mod hasher;
pub mod prefix;
pub mod shamap;

pub use hasher::Sha512Half;
pub use prefix::HashPrefix;
pub use shamap::{ShaMap, ShaMapItem};
