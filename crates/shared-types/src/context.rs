//! # Execution Context
//!
//! The handle every state transition runs against: a mutable view of the
//! application store, the current block height, and the events emitted so
//! far. Modules reach their own store through [`Context::kv_store`] and
//! [`Context::kv_store_mut`], keyed by [`StoreName`].

use crate::entities::BlockHeight;
use crate::events::{Event, EventManager};
use crate::ids::StoreName;
use crate::store::{CacheStore, KvStore, PrefixReader, PrefixStore};

pub struct Context<'a> {
    store: &'a mut dyn KvStore,
    block_height: BlockHeight,
    events: EventManager,
}

impl<'a> Context<'a> {
    pub fn new(store: &'a mut dyn KvStore, block_height: BlockHeight) -> Self {
        Self {
            store,
            block_height,
            events: EventManager::new(),
        }
    }

    pub fn block_height(&self) -> BlockHeight {
        self.block_height
    }

    /// Read-only view of one module store.
    pub fn kv_store(&self, name: StoreName) -> PrefixReader<'_> {
        PrefixReader::new(&*self.store, name.key_prefix())
    }

    /// Writable view of one module store.
    pub fn kv_store_mut(&mut self, name: StoreName) -> PrefixStore<'_> {
        PrefixStore::new(&mut *self.store, name.key_prefix())
    }

    pub fn emit_event(&mut self, event: Event) {
        self.events.emit_event(event);
    }

    pub fn events(&self) -> &[Event] {
        self.events.events()
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events.into_events()
    }
}

/// Runs `f` against a cache-wrapped branch of `ctx`.
///
/// On `Ok` the branch's writes are merged into `ctx`'s store and its events
/// appended to `ctx`. On `Err` both are discarded, leaving `ctx` exactly as it
/// was before the call.
pub fn run_atomic<T, E>(
    ctx: &mut Context<'_>,
    f: impl FnOnce(&mut Context<'_>) -> Result<T, E>,
) -> Result<T, E> {
    let height = ctx.block_height;
    let mut cache = CacheStore::new(&mut *ctx.store);
    let mut branch = Context::new(&mut cache, height);
    let result = f(&mut branch);
    let events = branch.into_events();
    if result.is_ok() {
        cache.commit();
        ctx.events.extend(events);
    }
    result
}
