//! # BK-02: Asset Ledger
//!
//! User-issued tokens for the Barkis ledger: a symbol registry plus the
//! Issue/Mint state machine, built on the height gates of
//! [`bk_01_upgrade_registry`].
//!
//! ## Architecture
//!
//! - **Domain**: [`Token`], [`Params`], [`IssueMsg`]/[`MintMsg`], the
//!   height-gated validation rules and [`AssetError`] codes
//! - **Ports**: [`SupplyKeeper`], the coin-movement collaborator
//! - **Adapters**: [`StoreSupplyKeeper`], balances kept in the `Supply` store
//! - **Keeper**: [`AssetKeeper`], typed access to tokens and params
//! - **Handler**: [`AssetHandler`], atomic Issue/Mint transitions
//! - **Querier**: [`AssetQuerier`], read-only JSON endpoints
//! - **Genesis**: [`GenesisState`] import, export and validation
//!
//! ## Atomicity
//!
//! Each Issue or Mint runs in its own cache-wrapped context. Token writes,
//! fee transfers, minting and events of one operation are merged together or
//! not at all.

pub mod adapters;
pub mod domain;
pub mod events;
pub mod genesis;
pub mod handler;
pub mod keeper;
pub mod ports;
pub mod querier;

pub use adapters::{ModulePermission, StoreSupplyKeeper};
pub use adapters::supply::AccountBalance;
pub use domain::*;
pub use genesis::{export_genesis, init_genesis, validate_genesis, GenesisError, GenesisState};
pub use handler::AssetHandler;
pub use keeper::AssetKeeper;
pub use ports::SupplyKeeper;
pub use querier::{paginate, AssetQuerier, QueryTokensParams, DEFAULT_QUERY_LIMIT};
