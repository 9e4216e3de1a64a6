//! Domain module for the Upgrade Registry.

pub mod hooks;
pub mod registry;

pub use hooks::{BlockPhase, UpgradeHook};
pub use registry::UpgradeRegistry;
