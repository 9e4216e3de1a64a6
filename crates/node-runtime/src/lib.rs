//! # Node Runtime Library
//!
//! The Barkis ledger application: configuration, module wiring and the block
//! lifecycle driver. The `node-runtime` binary is a thin shell over [`App`].
//!
//! ## Layout
//!
//! - `container/` - node config and the wired [`ModuleContainer`]
//! - `wiring/` - upgrade heights, gated stores/messages and migration hooks
//! - `genesis/` - the application genesis document
//! - `handlers/` - message and query routers
//! - [`app`] - InitChain / BeginBlock / DeliverTx / EndBlock / Commit

pub mod app;
pub mod container;
pub mod genesis;
pub mod handlers;
pub mod wiring;

pub use app::{App, AppError, AppHash, CommitResult};
pub use container::{ConfigError, ModuleContainer, NodeConfig, UpgradeHeights};
pub use genesis::{AppGenesis, AppGenesisError};
pub use handlers::TxResult;
