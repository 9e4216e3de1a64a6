//! # Shared Types Crate
//!
//! This crate contains the domain vocabulary shared by the ledger modules.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: addresses, coins and the typed identifiers
//!   for upgrades, stores and message kinds are defined once, here.
//! - **Determinism**: every collection that is iterated while computing state
//!   is ordered (`BTreeMap`, sorted `Coins`), never hash-ordered.
//! - **Isolated Views**: all writes go through a [`Context`] whose store can be
//!   cache-wrapped and either merged or discarded as a whole.

pub mod context;
pub mod entities;
pub mod errors;
pub mod events;
pub mod ids;
pub mod params;
pub mod store;

pub use context::{run_atomic, Context};
pub use entities::*;
pub use errors::*;
pub use events::{Attribute, Event, EventManager};
pub use ids::{MsgType, StoreName, UpgradeName};
pub use params::{KeyTable, Subspace};
pub use store::{CacheStore, KvIter, KvRead, KvStore, MemStore, PrefixReader, PrefixStore, WriteSet};
