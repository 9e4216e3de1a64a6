//! Upgrade hooks and their per-height schedules.

use std::collections::BTreeMap;

use shared_types::{BlockHeight, Context};

/// Callback run once, in the block whose height equals its upgrade's
/// activation height.
pub type UpgradeHook = Box<dyn Fn(&mut Context<'_>) + Send + Sync>;

/// The four dispatch points of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BlockPhase {
    /// Before any other begin-block work.
    BeginFirst,
    /// After all other begin-block work.
    BeginLast,
    /// Before any other end-block work.
    EndFirst,
    /// After all other end-block work.
    EndLast,
}

impl BlockPhase {
    pub const ALL: [BlockPhase; 4] = [
        BlockPhase::BeginFirst,
        BlockPhase::BeginLast,
        BlockPhase::EndFirst,
        BlockPhase::EndLast,
    ];

    /// Metric/log label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeginFirst => "begin_first",
            Self::BeginLast => "begin_last",
            Self::EndFirst => "end_first",
            Self::EndLast => "end_last",
        }
    }
}

/// Hooks of one phase, grouped by height, each group in registration order.
#[derive(Default)]
pub(crate) struct HookSchedule {
    by_height: BTreeMap<BlockHeight, Vec<UpgradeHook>>,
}

impl HookSchedule {
    pub(crate) fn push(&mut self, height: BlockHeight, hook: UpgradeHook) {
        self.by_height.entry(height).or_default().push(hook);
    }

    pub(crate) fn hooks_at(&self, height: BlockHeight) -> &[UpgradeHook] {
        self.by_height
            .get(&height)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn len(&self) -> usize {
        self.by_height.values().map(Vec::len).sum()
    }
}
