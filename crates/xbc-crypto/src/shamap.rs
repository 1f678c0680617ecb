use xbc_types::{BytesSink, Hash256};

use crate::hasher::Sha512Half;
use crate::prefix::HashPrefix;

/// Something that can be stored in a [`ShaMap`] leaf.
pub trait ShaMapItem {
    /// Prefix under which the leaf is hashed.
    fn hash_prefix(&self) -> HashPrefix;

    /// Write the item's canonical bytes.
    fn write_to(&self, sink: &mut dyn BytesSink);
}

/// Radix-16 Merkle tree keyed by 256-bit indexes.
///
/// Each inner node at depth `d` routes on nibble `d` of the index. A leaf
/// stays as shallow as possible: it is pushed down only when another index
/// sharing its path prefix arrives. The root hash therefore depends only on
/// the set of `(index, item)` pairs, not on insertion order.
pub struct ShaMap<T> {
    root: Inner<T>,
    len: usize,
}

struct Leaf<T> {
    index: Hash256,
    item: T,
}

struct Inner<T> {
    depth: usize,
    branches: [Option<Node<T>>; 16],
}

enum Node<T> {
    Leaf(Leaf<T>),
    Inner(Box<Inner<T>>),
}

impl<T: ShaMapItem> ShaMap<T> {
    pub fn new() -> Self {
        Self {
            root: Inner::new(0),
            len: 0,
        }
    }

    /// Insert `item` at `index`.
    ///
    /// An item already stored at the same index is replaced and returned.
    pub fn add_item(&mut self, index: Hash256, item: T) -> Option<T> {
        let replaced = self.root.add(Leaf { index, item });
        if replaced.is_none() {
            self.len += 1;
        }
        replaced
    }

    /// Root hash; all zeros for an empty map.
    pub fn hash(&self) -> Hash256 {
        self.root.hash()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T: ShaMapItem> Default for ShaMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ShaMapItem> FromIterator<(Hash256, T)> for ShaMap<T> {
    fn from_iter<I: IntoIterator<Item = (Hash256, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (index, item) in iter {
            map.add_item(index, item);
        }
        map
    }
}

impl<T: ShaMapItem> Leaf<T> {
    fn hash(&self) -> Hash256 {
        let mut hasher = Sha512Half::with_prefix(self.item.hash_prefix());
        self.item.write_to(&mut hasher);
        hasher.update(self.index.as_bytes());
        hasher.finish()
    }
}

impl<T: ShaMapItem> Inner<T> {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            branches: std::array::from_fn(|_| None),
        }
    }

    fn is_empty(&self) -> bool {
        self.branches.iter().all(Option::is_none)
    }

    fn add(&mut self, leaf: Leaf<T>) -> Option<T> {
        let slot = &mut self.branches[leaf.index.nibble(self.depth) as usize];
        match slot.take() {
            None => {
                *slot = Some(Node::Leaf(leaf));
                None
            }
            Some(Node::Leaf(existing)) if existing.index == leaf.index => {
                *slot = Some(Node::Leaf(leaf));
                Some(existing.item)
            }
            Some(Node::Leaf(existing)) => {
                tracing::trace!(depth = self.depth + 1, "splitting leaf into inner node");
                let mut inner = Inner::new(self.depth + 1);
                inner.add(existing);
                inner.add(leaf);
                *slot = Some(Node::Inner(Box::new(inner)));
                None
            }
            Some(Node::Inner(mut inner)) => {
                let replaced = inner.add(leaf);
                *slot = Some(Node::Inner(inner));
                replaced
            }
        }
    }

    fn hash(&self) -> Hash256 {
        if self.is_empty() {
            return Hash256::ZERO;
        }
        let mut hasher = Sha512Half::with_prefix(HashPrefix::INNER_NODE);
        for branch in &self.branches {
            let hash = match branch {
                None => Hash256::ZERO,
                Some(Node::Leaf(leaf)) => leaf.hash(),
                Some(Node::Inner(inner)) => inner.hash(),
            };
            hasher.update(hash.as_bytes());
        }
        hasher.finish()
    }
}
