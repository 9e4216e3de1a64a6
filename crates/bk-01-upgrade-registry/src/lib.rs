//! # BK-01: Upgrade Registry
//!
//! Height-gated feature flags for the Barkis ledger. Every behavioural change
//! (new validation rules, new message kinds, new stores, one-shot parameter
//! migrations) is expressed as "is the current block height at or past X".
//!
//! ## Architecture
//!
//! - **Domain**: [`UpgradeRegistry`] and its hook schedules
//! - **Ports**: [`HeightGate`], the read-only gating surface handed to
//!   validation code
//!
//! ## Lifecycle
//!
//! 1. Wiring: every node registers the same heights, stores, messages and
//!    hooks at startup. Misuse panics; a misconfigured binary must not start.
//! 2. The registry is then frozen behind an `Arc` and shared.
//! 3. Per block: `set_block_height`, then the begin/end hook dispatchers,
//!    then any number of gating queries.
//!
//! ## Example
//!
//! ```rust
//! use bk_01_upgrade_registry::UpgradeRegistry;
//! use shared_types::{MsgType, UpgradeName};
//!
//! let mut registry = UpgradeRegistry::new();
//! registry.register_upgrade_height(UpgradeName::TokenIssue, 100);
//! registry.register_new_msg(UpgradeName::TokenIssue, &[MsgType::Issue]);
//!
//! registry.set_block_height(99);
//! assert!(!registry.msg_check(MsgType::Issue));
//! registry.set_block_height(100);
//! assert!(registry.is_on_upgrade_height(UpgradeName::TokenIssue));
//! assert!(registry.msg_check(MsgType::Issue));
//! ```

pub mod domain;
pub mod ports;

pub use domain::{BlockPhase, UpgradeHook, UpgradeRegistry};
pub use ports::HeightGate;
