//! Upgrade registrations for the asset module.

use bk_01_upgrade_registry::UpgradeRegistry;
use bk_02_asset::{native_fee, AssetKeeper, Params};
use shared_types::{MsgType, StoreName, UpgradeName};
use tracing::info;

use crate::container::UpgradeHeights;

pub const TOKEN_ISSUE_MAX_DECIMAL: i8 = 10;
pub const TOKEN_ISSUE_ISSUE_FEE: u128 = 10_000_000_000;
pub const TOKEN_ISSUE_MINT_FEE: u128 = 5_000_000_000;

pub const SYMBOL_RULES_ISSUE_FEE: u128 = 2_000_000_000;
pub const SYMBOL_RULES_MINT_FEE: u128 = 1_000_000_000;

/// Registers every upgrade at the heights in `heights`. Hooks capture a
/// clone of `keeper`.
///
/// # Panics
///
/// If any height is 0. Validate the config first.
pub fn register_upgrades(
    registry: &mut UpgradeRegistry,
    heights: &UpgradeHeights,
    keeper: &AssetKeeper,
) {
    for (name, height) in heights.iter() {
        registry.register_upgrade_height(name, height);
    }

    register_token_issue(registry, keeper.clone());
    register_symbol_rules(registry, keeper.clone());
    // TokenDesLenLimit only moves validation thresholds; nothing to migrate.

    info!(
        token_issue = heights.token_issue,
        update_token_symbol_rules = heights.update_token_symbol_rules,
        token_des_len_limit = heights.token_des_len_limit,
        "Upgrades registered"
    );
}

fn register_token_issue(registry: &mut UpgradeRegistry, keeper: AssetKeeper) {
    registry.register_new_store(UpgradeName::TokenIssue, &[StoreName::Asset]);
    registry.register_new_msg(UpgradeName::TokenIssue, &[MsgType::Issue, MsgType::Mint]);
    registry.register_begin_blocker_first(UpgradeName::TokenIssue, move |ctx| {
        let params = Params::native(
            TOKEN_ISSUE_MAX_DECIMAL,
            TOKEN_ISSUE_ISSUE_FEE,
            TOKEN_ISSUE_MINT_FEE,
        );
        keeper.set_params(ctx, &params);
        info!(height = ctx.block_height(), %params, "Asset params initialised");
    });
}

fn register_symbol_rules(registry: &mut UpgradeRegistry, keeper: AssetKeeper) {
    registry.register_begin_blocker_first(UpgradeName::UpdateTokenSymbolRules, move |ctx| {
        keeper.set_issue_fee(ctx, &native_fee(SYMBOL_RULES_ISSUE_FEE));
        keeper.set_mint_fee(ctx, &native_fee(SYMBOL_RULES_MINT_FEE));
        info!(height = ctx.block_height(), "Asset fees lowered");
    });
}
