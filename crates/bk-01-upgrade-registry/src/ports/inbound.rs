//! Inbound Ports (Driving Ports / API)
//!
//! The read-only gating surface. Validation code depends on this trait, not
//! on the concrete registry, so each test can drive its own heights.

use shared_types::{BlockHeight, MsgType, StoreName, UpgradeName};

pub trait HeightGate: Send + Sync {
    /// Height of the block currently being processed.
    fn block_height(&self) -> BlockHeight;

    /// True iff the current height is at or past the upgrade's activation
    /// height. Unregistered upgrades are never applied.
    fn is_upgrade_applied(&self, name: UpgradeName) -> bool;

    /// True iff the current height is exactly the upgrade's activation height.
    fn is_on_upgrade_height(&self, name: UpgradeName) -> bool;

    /// True if the message kind is not gated or its upgrade has activated.
    fn msg_check(&self, msg: MsgType) -> bool;

    /// True if the store is not gated or its upgrade has activated.
    fn store_check(&self, store: StoreName) -> bool;
}
