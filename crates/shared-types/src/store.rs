//! # Key-Value Store Abstraction
//!
//! The ledger persists everything through an ordered byte-keyed store.
//!
//! - [`MemStore`]: the durable, ordered backing map.
//! - [`CacheStore`]: an isolated, uncommitted view over a parent store. Its
//!   writes become visible to the parent only on [`CacheStore::commit`];
//!   dropping it discards them.
//! - [`PrefixStore`] / [`PrefixReader`]: a namespace inside a parent store,
//!   used to give each module its own store.
//!
//! Prefix iteration always yields keys in ascending byte order.

use std::collections::BTreeMap;

/// Iterator over `(key, value)` pairs in ascending key order.
pub type KvIter<'a> = Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>;

/// Pending writes of a cache view. `None` marks a deletion.
pub type WriteSet = BTreeMap<Vec<u8>, Option<Vec<u8>>>;

/// Read side of a key-value store.
pub trait KvRead {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// All entries whose key starts with `prefix`, in ascending key order.
    fn prefix_iter(&self, prefix: &[u8]) -> KvIter<'_>;
}

/// Read-write key-value store.
pub trait KvStore: KvRead {
    fn set(&mut self, key: &[u8], value: Vec<u8>);
    fn delete(&mut self, key: &[u8]);
}

// =============================================================================
// MemStore
// =============================================================================

/// Ordered in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl KvRead for MemStore {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.data.get(key).cloned()
    }

    fn has(&self, key: &[u8]) -> bool {
        self.data.contains_key(key)
    }

    fn prefix_iter(&self, prefix: &[u8]) -> KvIter<'_> {
        let prefix = prefix.to_vec();
        Box::new(
            self.data
                .range(prefix.clone()..)
                .take_while(move |(k, _)| k.starts_with(&prefix))
                .map(|(k, v)| (k.clone(), v.clone())),
        )
    }
}

impl KvStore for MemStore {
    fn set(&mut self, key: &[u8], value: Vec<u8>) {
        self.data.insert(key.to_vec(), value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.data.remove(key);
    }
}

// =============================================================================
// CacheStore
// =============================================================================

/// Isolated view over a parent store.
pub struct CacheStore<'p> {
    parent: &'p mut dyn KvStore,
    writes: WriteSet,
}

impl<'p> CacheStore<'p> {
    pub fn new(parent: &'p mut dyn KvStore) -> Self {
        Self::with_writes(parent, WriteSet::new())
    }

    /// Resumes a view whose pending writes were detached with
    /// [`CacheStore::into_writes`].
    pub fn with_writes(parent: &'p mut dyn KvStore, writes: WriteSet) -> Self {
        Self { parent, writes }
    }

    pub fn is_dirty(&self) -> bool {
        !self.writes.is_empty()
    }

    /// Merges every pending write into the parent store.
    pub fn commit(self) {
        let CacheStore { parent, writes } = self;
        for (key, value) in writes {
            match value {
                Some(value) => parent.set(&key, value),
                None => parent.delete(&key),
            }
        }
    }

    /// Detaches the pending writes without applying them.
    pub fn into_writes(self) -> WriteSet {
        self.writes
    }
}

impl KvRead for CacheStore<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.writes.get(key) {
            Some(pending) => pending.clone(),
            None => self.parent.get(key),
        }
    }

    fn prefix_iter(&self, prefix: &[u8]) -> KvIter<'_> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> = self.parent.prefix_iter(prefix).collect();
        let pending = self
            .writes
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix));
        for (key, value) in pending {
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        Box::new(merged.into_iter())
    }
}

impl KvStore for CacheStore<'_> {
    fn set(&mut self, key: &[u8], value: Vec<u8>) {
        self.writes.insert(key.to_vec(), Some(value));
    }

    fn delete(&mut self, key: &[u8]) {
        self.writes.insert(key.to_vec(), None);
    }
}

// =============================================================================
// Prefixed namespaces
// =============================================================================

fn prefixed(prefix: &[u8], key: &[u8]) -> Vec<u8> {
    let mut full = Vec::with_capacity(prefix.len() + key.len());
    full.extend_from_slice(prefix);
    full.extend_from_slice(key);
    full
}

fn strip_prefix(plen: usize, it: KvIter<'_>) -> KvIter<'_> {
    Box::new(it.map(move |(k, v)| (k[plen..].to_vec(), v)))
}

/// Writable namespace inside a parent store.
pub struct PrefixStore<'a> {
    parent: &'a mut dyn KvStore,
    prefix: Vec<u8>,
}

impl<'a> PrefixStore<'a> {
    pub fn new(parent: &'a mut dyn KvStore, prefix: Vec<u8>) -> Self {
        Self { parent, prefix }
    }
}

impl KvRead for PrefixStore<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.parent.get(&prefixed(&self.prefix, key))
    }

    fn has(&self, key: &[u8]) -> bool {
        self.parent.has(&prefixed(&self.prefix, key))
    }

    fn prefix_iter(&self, prefix: &[u8]) -> KvIter<'_> {
        strip_prefix(
            self.prefix.len(),
            self.parent.prefix_iter(&prefixed(&self.prefix, prefix)),
        )
    }
}

impl KvStore for PrefixStore<'_> {
    fn set(&mut self, key: &[u8], value: Vec<u8>) {
        self.parent.set(&prefixed(&self.prefix, key), value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.parent.delete(&prefixed(&self.prefix, key));
    }
}

/// Read-only namespace inside a parent store.
pub struct PrefixReader<'a> {
    parent: &'a dyn KvStore,
    prefix: Vec<u8>,
}

impl<'a> PrefixReader<'a> {
    pub fn new(parent: &'a dyn KvStore, prefix: Vec<u8>) -> Self {
        Self { parent, prefix }
    }

    /// Like [`KvRead::prefix_iter`], but borrowing the parent store instead
    /// of the reader, so the iterator can outlive this handle.
    pub fn into_prefix_iter(self, prefix: &[u8]) -> KvIter<'a> {
        let parent: &'a dyn KvStore = self.parent;
        strip_prefix(
            self.prefix.len(),
            parent.prefix_iter(&prefixed(&self.prefix, prefix)),
        )
    }
}

impl KvRead for PrefixReader<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.parent.get(&prefixed(&self.prefix, key))
    }

    fn has(&self, key: &[u8]) -> bool {
        self.parent.has(&prefixed(&self.prefix, key))
    }

    fn prefix_iter(&self, prefix: &[u8]) -> KvIter<'_> {
        strip_prefix(
            self.prefix.len(),
            self.parent.prefix_iter(&prefixed(&self.prefix, prefix)),
        )
    }
}
