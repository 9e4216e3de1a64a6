//! # Upgrade Registry
//!
//! Maps each [`UpgradeName`] to an activation height, each gated store and
//! message kind to the height of the upgrade that introduced it, and each
//! height to the hooks that run in that block.
//!
//! ## Wiring vs. runtime
//!
//! All `register_*` methods take `&mut self` and run before the registry is
//! shared. Associating anything with an upgrade that has no non-zero height
//! panics. At runtime the registry is read-only except for the current block
//! height, which the block driver writes once per block.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use shared_types::{BlockHeight, Context, MsgType, StoreName, UpgradeName};
use tracing::{debug, info};

use super::hooks::{BlockPhase, HookSchedule, UpgradeHook};
use crate::ports::HeightGate;

#[derive(Default)]
pub struct UpgradeRegistry {
    upgrade_heights: BTreeMap<UpgradeName, BlockHeight>,
    store_heights: BTreeMap<StoreName, BlockHeight>,
    msg_heights: BTreeMap<MsgType, BlockHeight>,
    hooks: BTreeMap<BlockPhase, HookSchedule>,
    block_height: AtomicU64,
}

impl UpgradeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Wiring
    // =========================================================================

    /// Upserts the activation height of `name`. [`shared_types::HEIGHT_NEVER`]
    /// keeps the upgrade disabled.
    pub fn register_upgrade_height(&mut self, name: UpgradeName, height: BlockHeight) {
        debug!(upgrade = %name, height, "Registering upgrade height");
        self.upgrade_heights.insert(name, height);
    }

    /// Gates `stores` on the activation of `name`.
    pub fn register_new_store(&mut self, name: UpgradeName, stores: &[StoreName]) {
        let height = self.required_height(name);
        for store in stores {
            self.store_heights.insert(*store, height);
        }
    }

    /// Gates `msgs` on the activation of `name`.
    pub fn register_new_msg(&mut self, name: UpgradeName, msgs: &[MsgType]) {
        let height = self.required_height(name);
        for msg in msgs {
            self.msg_heights.insert(*msg, height);
        }
    }

    pub fn register_begin_blocker_first(
        &mut self,
        name: UpgradeName,
        hook: impl Fn(&mut Context<'_>) + Send + Sync + 'static,
    ) {
        self.register_hook(BlockPhase::BeginFirst, name, Box::new(hook));
    }

    pub fn register_begin_blocker_last(
        &mut self,
        name: UpgradeName,
        hook: impl Fn(&mut Context<'_>) + Send + Sync + 'static,
    ) {
        self.register_hook(BlockPhase::BeginLast, name, Box::new(hook));
    }

    pub fn register_end_blocker_first(
        &mut self,
        name: UpgradeName,
        hook: impl Fn(&mut Context<'_>) + Send + Sync + 'static,
    ) {
        self.register_hook(BlockPhase::EndFirst, name, Box::new(hook));
    }

    pub fn register_end_blocker_last(
        &mut self,
        name: UpgradeName,
        hook: impl Fn(&mut Context<'_>) + Send + Sync + 'static,
    ) {
        self.register_hook(BlockPhase::EndLast, name, Box::new(hook));
    }

    fn register_hook(&mut self, phase: BlockPhase, name: UpgradeName, hook: UpgradeHook) {
        let height = self.required_height(name);
        debug!(upgrade = %name, height, phase = phase.as_str(), "Registering upgrade hook");
        self.hooks.entry(phase).or_default().push(height, hook);
    }

    /// Activation height of `name`, panicking if it was never registered or
    /// was registered at height 0.
    fn required_height(&self, name: UpgradeName) -> BlockHeight {
        match self.upgrade_heights.get(&name) {
            Some(&height) if height > 0 => height,
            _ => panic!("upgrade {name} has no registered activation height"),
        }
    }

    // =========================================================================
    // Block driver
    // =========================================================================

    /// Records the height of the block being processed. Must precede every
    /// gating query and hook dispatch of that block.
    pub fn set_block_height(&self, height: BlockHeight) {
        self.block_height.store(height, Ordering::Release);
    }

    pub fn block_height(&self) -> BlockHeight {
        self.block_height.load(Ordering::Acquire)
    }

    /// Runs the hooks of `phase` scheduled for the current height, in
    /// registration order. Returns how many ran.
    pub fn dispatch(&self, phase: BlockPhase, ctx: &mut Context<'_>) -> usize {
        let height = self.block_height();
        let hooks = match self.hooks.get(&phase) {
            Some(schedule) => schedule.hooks_at(height),
            None => return 0,
        };
        if !hooks.is_empty() {
            info!(height, phase = phase.as_str(), count = hooks.len(), "Running upgrade hooks");
        }
        for hook in hooks {
            hook(ctx);
        }
        hooks.len()
    }

    pub fn begin_blockers_first(&self, ctx: &mut Context<'_>) -> usize {
        self.dispatch(BlockPhase::BeginFirst, ctx)
    }

    pub fn begin_blockers_last(&self, ctx: &mut Context<'_>) -> usize {
        self.dispatch(BlockPhase::BeginLast, ctx)
    }

    pub fn end_blockers_first(&self, ctx: &mut Context<'_>) -> usize {
        self.dispatch(BlockPhase::EndFirst, ctx)
    }

    pub fn end_blockers_last(&self, ctx: &mut Context<'_>) -> usize {
        self.dispatch(BlockPhase::EndLast, ctx)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get_upgrade_height(&self, name: UpgradeName) -> Option<BlockHeight> {
        self.upgrade_heights.get(&name).copied()
    }

    pub fn get_store_height(&self, store: StoreName) -> Option<BlockHeight> {
        self.store_heights.get(&store).copied()
    }

    pub fn get_msg_height(&self, msg: MsgType) -> Option<BlockHeight> {
        self.msg_heights.get(&msg).copied()
    }

    pub fn is_upgrade_applied(&self, name: UpgradeName) -> bool {
        self.get_upgrade_height(name)
            .is_some_and(|h| self.block_height() >= h)
    }

    pub fn is_on_upgrade_height(&self, name: UpgradeName) -> bool {
        self.get_upgrade_height(name)
            .is_some_and(|h| self.block_height() == h)
    }

    pub fn msg_check(&self, msg: MsgType) -> bool {
        self.get_msg_height(msg)
            .map_or(true, |h| self.block_height() >= h)
    }

    pub fn store_check(&self, store: StoreName) -> bool {
        self.get_store_height(store)
            .map_or(true, |h| self.block_height() >= h)
    }

    /// True iff `store` is gated and the current height is exactly the height
    /// at which it appears.
    pub fn is_on_store_start_height(&self, store: StoreName) -> bool {
        self.get_store_height(store)
            .is_some_and(|h| self.block_height() == h)
    }

    /// Number of hooks registered for `phase`, across all heights.
    pub fn hook_count(&self, phase: BlockPhase) -> usize {
        self.hooks.get(&phase).map_or(0, HookSchedule::len)
    }
}

impl fmt::Debug for UpgradeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hooks: BTreeMap<&str, usize> = BlockPhase::ALL
            .iter()
            .map(|p| (p.as_str(), self.hook_count(*p)))
            .collect();
        f.debug_struct("UpgradeRegistry")
            .field("upgrade_heights", &self.upgrade_heights)
            .field("store_heights", &self.store_heights)
            .field("msg_heights", &self.msg_heights)
            .field("hooks", &hooks)
            .field("block_height", &self.block_height())
            .finish()
    }
}

impl HeightGate for UpgradeRegistry {
    fn block_height(&self) -> BlockHeight {
        UpgradeRegistry::block_height(self)
    }

    fn is_upgrade_applied(&self, name: UpgradeName) -> bool {
        UpgradeRegistry::is_upgrade_applied(self, name)
    }

    fn is_on_upgrade_height(&self, name: UpgradeName) -> bool {
        UpgradeRegistry::is_on_upgrade_height(self, name)
    }

    fn msg_check(&self, msg: MsgType) -> bool {
        UpgradeRegistry::msg_check(self, msg)
    }

    fn store_check(&self, store: StoreName) -> bool {
        UpgradeRegistry::store_check(self, store)
    }
}
