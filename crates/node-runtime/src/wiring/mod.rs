//! # Upgrade Wiring
//!
//! Registers every upgrade of the ledger with the [`UpgradeRegistry`]:
//! activation heights, the stores and messages each upgrade introduces, and
//! the one-shot parameter migrations that run in its activation block.
//!
//! ## Upgrades
//!
//! | Upgrade | Stores | Messages | Begin-block hook |
//! |---------|--------|----------|------------------|
//! | `TokenIssue` | `Asset` | `Issue`, `Mint` | asset params: decimal 10, fees 1e10 / 5e9 |
//! | `UpdateTokenSymbolRules` | - | - | fees 2e9 / 1e9 |
//! | `TokenDesLenLimit` | - | - | none; switches symbol/description rules |
//!
//! Wiring runs identically on every node before the registry is shared.
//!
//! [`UpgradeRegistry`]: bk_01_upgrade_registry::UpgradeRegistry

pub mod upgrades;

pub use upgrades::*;
