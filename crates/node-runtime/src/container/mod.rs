//! # Module Container
//!
//! Builds the ledger modules once from a [`NodeConfig`] and hands out shared
//! handles. Construction order:
//!
//! 1. Supply ledger with its module accounts (`fee_collector`, `asset`)
//! 2. Asset keeper over the supply ledger
//! 3. Upgrade registry, wired, then frozen behind an `Arc`
//! 4. Handler and querier, both gated by the frozen registry

pub mod config;

pub use config::{BaseConfig, ConfigError, NodeConfig, UpgradeHeights};

use std::sync::Arc;

use bk_01_upgrade_registry::{HeightGate, UpgradeRegistry};
use bk_02_asset::{
    AssetHandler, AssetKeeper, AssetQuerier, ModulePermission, StoreSupplyKeeper, MODULE_NAME,
};
use shared_types::FEE_COLLECTOR_NAME;

use crate::wiring::register_upgrades;

/// Every module of the application, wired.
#[derive(Clone)]
pub struct ModuleContainer {
    pub registry: Arc<UpgradeRegistry>,
    pub supply: Arc<StoreSupplyKeeper>,
    pub keeper: AssetKeeper,
    pub handler: AssetHandler,
    pub querier: AssetQuerier,
}

impl ModuleContainer {
    /// Wires every module for the upgrade heights in `config`.
    ///
    /// # Panics
    ///
    /// If an upgrade height is 0. [`NodeConfig::validate`] rejects that.
    pub fn new(config: &NodeConfig) -> Self {
        let supply = Arc::new(
            StoreSupplyKeeper::new()
                .with_module(FEE_COLLECTOR_NAME, &[])
                .with_module(MODULE_NAME, &[ModulePermission::Minter]),
        );
        let keeper = AssetKeeper::new(supply.clone());

        let mut registry = UpgradeRegistry::new();
        register_upgrades(&mut registry, &config.upgrade, &keeper);
        let registry = Arc::new(registry);

        let gate: Arc<dyn HeightGate> = registry.clone();
        let handler = AssetHandler::new(keeper.clone(), gate.clone());
        let querier = AssetQuerier::new(keeper.clone(), gate);

        Self {
            registry,
            supply,
            keeper,
            handler,
            querier,
        }
    }
}
