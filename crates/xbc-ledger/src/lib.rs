//! Ledger-level hashing for the XAH binary codec.
//!
//! This crate provides:
//! - [`LedgerHeader`] and its canonical hash ([`ledger_hash`])
//! - [`decode_ledger_data`], the inverse parse of a serialized header
//! - SHAMap itemizers for transactions with metadata and for state entries
//! - [`transaction_tree_hash`] / [`account_state_hash`] root computations

pub mod error;
pub mod hashes;
pub mod header;
pub mod items;

pub use error::{LedgerError, LedgerResult};
pub use hashes::{account_state_hash, ledger_hash, transaction_tree_hash};
pub use header::{decode_ledger_data, LedgerHeader};
pub use items::{StateEntryItem, TransactionItem};
