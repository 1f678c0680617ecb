use serde_json::Value;
use xbc_binary::CodecContext;
use xbc_crypto::{HashPrefix, Sha512Half, ShaMap, ShaMapItem};
use xbc_types::Hash256;

use crate::error::LedgerResult;
use crate::header::LedgerHeader;
use crate::items::{StateEntryItem, TransactionItem};

fn compute_root<T, F>(ctx: &CodecContext<'_>, items: &[Value], itemize: F) -> LedgerResult<Hash256>
where
    T: ShaMapItem,
    F: Fn(&CodecContext<'_>, &Value) -> LedgerResult<(Hash256, T)>,
{
    let mut map = ShaMap::new();
    for json in items {
        let (index, item) = itemize(ctx, json)?;
        map.add_item(index, item);
    }
    let root = map.hash();
    tracing::debug!(items = map.len(), root = %root, "computed shamap root");
    Ok(root)
}

/// Root of the transaction tree built from transactions carrying `hash` and
/// `metaData`.
pub fn transaction_tree_hash(ctx: &CodecContext<'_>, transactions: &[Value]) -> LedgerResult<Hash256> {
    compute_root(ctx, transactions, TransactionItem::from_json)
}

/// Root of the state tree built from ledger entries carrying `index`.
pub fn account_state_hash(ctx: &CodecContext<'_>, entries: &[Value]) -> LedgerResult<Hash256> {
    compute_root(ctx, entries, StateEntryItem::from_json)
}

/// Hash of a ledger header under the `LWR` prefix.
pub fn ledger_hash(header: &LedgerHeader) -> LedgerResult<Hash256> {
    let mut hasher = Sha512Half::with_prefix(HashPrefix::LEDGER_HEADER);
    header.write_to(&mut hasher)?;
    Ok(hasher.finish())
}
