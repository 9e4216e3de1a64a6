//! # Parameter Subspaces
//!
//! Governance-adjustable parameters live in the Params store, one namespace
//! per module. A [`Subspace`] only accepts the keys declared in its
//! [`KeyTable`]; values are JSON-encoded.
//!
//! Reading a declared key that was never written, touching an undeclared
//! key, or finding undecodable bytes are wiring mistakes and panic.

use std::collections::BTreeSet;

use serde::{de::DeserializeOwned, Serialize};

use crate::context::Context;
use crate::ids::StoreName;
use crate::store::{KvRead, KvStore};

/// The set of keys a subspace accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyTable {
    keys: BTreeSet<&'static str>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: &'static str) -> Self {
        self.keys.insert(key);
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

/// A module's namespace in the Params store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subspace {
    name: String,
    table: KeyTable,
}

impl Subspace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: KeyTable::new(),
        }
    }

    pub fn with_key_table(mut self, table: KeyTable) -> Self {
        self.table = table;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn store_key(&self, key: &str) -> Vec<u8> {
        self.check_key(key);
        format!("{}/{}", self.name, key).into_bytes()
    }

    fn check_key(&self, key: &str) {
        if !self.table.contains(key) {
            panic!("parameter {} not registered in subspace {}", key, self.name);
        }
    }

    /// Value of `key`. Panics if it was never set.
    pub fn get<T: DeserializeOwned>(&self, ctx: &Context<'_>, key: &str) -> T {
        match self.get_if_exists(ctx, key) {
            Some(value) => value,
            None => panic!("parameter {}/{} is not set", self.name, key),
        }
    }

    pub fn get_if_exists<T: DeserializeOwned>(&self, ctx: &Context<'_>, key: &str) -> Option<T> {
        let raw = ctx.kv_store(StoreName::Params).get(&self.store_key(key))?;
        match serde_json::from_slice(&raw) {
            Ok(value) => Some(value),
            Err(e) => panic!("malformed parameter {}/{}: {}", self.name, key, e),
        }
    }

    pub fn has(&self, ctx: &Context<'_>, key: &str) -> bool {
        ctx.kv_store(StoreName::Params).has(&self.store_key(key))
    }

    pub fn set<T: Serialize>(&self, ctx: &mut Context<'_>, key: &str, value: &T) {
        let store_key = self.store_key(key);
        let raw = match serde_json::to_vec(value) {
            Ok(raw) => raw,
            Err(e) => panic!("unencodable parameter {}/{}: {}", self.name, key, e),
        };
        ctx.kv_store_mut(StoreName::Params).set(&store_key, raw);
    }
}
