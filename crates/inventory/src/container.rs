//! Open inventory views.

use std::sync::Arc;

use invkit_core::{ApiResult, ContainerId, PlayerId};

use crate::inventory::Inventory;
use crate::item::ItemStack;
use crate::slot::SlotRef;

/// Inventories currently opened by a viewer, implemented by the host.
pub trait Container: core::fmt::Debug + Send + Sync {
    fn id(&self) -> ContainerId;

    /// The player who opened this container.
    fn viewer(&self) -> PlayerId;

    /// The inventories shown to the viewer, excluding the viewer's own grid.
    fn viewed(&self) -> Vec<Arc<dyn Inventory>>;

    /// False once the viewer has closed the container.
    fn is_open(&self) -> bool;

    /// Place `stack` on the viewer's cursor. An empty stack clears it.
    fn set_cursor(&self, stack: ItemStack) -> ApiResult<()>;

    /// The stack on the viewer's cursor; `None` when nothing is held or the
    /// container has no viewer any more.
    fn cursor(&self) -> Option<ItemStack>;

    fn is_viewed_by(&self, player: PlayerId) -> bool {
        self.is_open() && self.viewer() == player
    }

    /// True if `slot` belongs to one of the [`viewed`](Container::viewed)
    /// inventories.
    fn is_viewed_slot(&self, slot: &SlotRef) -> bool {
        self.viewed()
            .iter()
            .flat_map(|inventory| inventory.slots())
            .any(|candidate| Arc::ptr_eq(&candidate, slot))
    }

    /// Slot `index` of the first viewed inventory.
    fn slot(&self, index: usize) -> Option<SlotRef> {
        self.viewed().first()?.slot(index)
    }
}
