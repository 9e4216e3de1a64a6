//! Adapters for the asset ledger's outbound ports.

pub mod supply;

pub use supply::{ModulePermission, StoreSupplyKeeper};
