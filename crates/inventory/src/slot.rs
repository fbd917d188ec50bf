//! Slots and the per-slot before/after record.

use std::sync::Arc;

use invkit_core::ApiResult;

use crate::item::{ItemStack, ItemStackSnapshot};

/// A single item-holding location, implemented by the host.
///
/// Methods take `&self`: a slot is a view into host-owned inventory state and
/// the host is responsible for serialising access to it.
pub trait Slot: core::fmt::Debug + Send + Sync {
    /// Position of this slot within its parent inventory.
    fn index(&self) -> usize;

    /// Copy of the stack currently held.
    fn peek(&self) -> ItemStack;

    /// Replace the slot's contents.
    fn set(&self, stack: ItemStack) -> ApiResult<()>;

    fn is_empty(&self) -> bool {
        self.peek().is_empty()
    }

    fn clear(&self) -> ApiResult<()> {
        self.set(ItemStack::empty())
    }
}

/// Shared handle to a host slot.
pub type SlotRef = Arc<dyn Slot>;

/// Before/after record of one slot change.
#[derive(Debug, Clone)]
pub struct SlotTransaction {
    slot: SlotRef,
    original: ItemStackSnapshot,
    default_replacement: ItemStackSnapshot,
    custom_replacement: Option<ItemStackSnapshot>,
    valid: bool,
}

impl SlotTransaction {
    pub fn new(
        slot: SlotRef,
        original: ItemStackSnapshot,
        default_replacement: ItemStackSnapshot,
    ) -> Self {
        Self {
            slot,
            original,
            default_replacement,
            custom_replacement: None,
            valid: true,
        }
    }

    pub fn slot(&self) -> &SlotRef {
        &self.slot
    }

    pub fn original(&self) -> &ItemStackSnapshot {
        &self.original
    }

    pub fn default_replacement(&self) -> &ItemStackSnapshot {
        &self.default_replacement
    }

    pub fn custom_replacement(&self) -> Option<&ItemStackSnapshot> {
        self.custom_replacement.as_ref()
    }

    /// Override what the slot ends up holding. `None` restores the default.
    pub fn set_custom_replacement(&mut self, replacement: Option<ItemStackSnapshot>) {
        self.custom_replacement = replacement;
    }

    /// The custom replacement if one was set, otherwise the default.
    pub fn final_replacement(&self) -> &ItemStackSnapshot {
        self.custom_replacement
            .as_ref()
            .unwrap_or(&self.default_replacement)
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }
}

/// Slot identity is the shared handle, not the slot's current contents.
impl PartialEq for SlotTransaction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
            && self.original == other.original
            && self.default_replacement == other.default_replacement
            && self.custom_replacement == other.custom_replacement
            && self.valid == other.valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemType;
    use crate::memory::MemoryInventory;

    fn snapshot(key: &'static str, quantity: u32) -> ItemStackSnapshot {
        ItemStack::new(ItemType::new(key), quantity).create_snapshot()
    }

    #[test]
    fn final_replacement_prefers_custom() {
        let inventory = MemoryInventory::new(1);
        let mut tx = SlotTransaction::new(
            inventory.slot_ref(0).unwrap(),
            ItemStackSnapshot::empty(),
            snapshot("minecraft:dirt", 2),
        );
        assert_eq!(tx.final_replacement(), &snapshot("minecraft:dirt", 2));

        tx.set_custom_replacement(Some(snapshot("minecraft:gravel", 1)));
        assert_eq!(tx.final_replacement(), &snapshot("minecraft:gravel", 1));

        tx.set_custom_replacement(None);
        assert_eq!(tx.final_replacement(), tx.default_replacement());
    }

    #[test]
    fn equality_uses_slot_identity() {
        let inventory = MemoryInventory::new(2);
        let a = SlotTransaction::new(
            inventory.slot_ref(0).unwrap(),
            ItemStackSnapshot::empty(),
            snapshot("minecraft:dirt", 1),
        );
        let same_slot = SlotTransaction::new(
            inventory.slot_ref(0).unwrap(),
            ItemStackSnapshot::empty(),
            snapshot("minecraft:dirt", 1),
        );
        let other_slot = SlotTransaction::new(
            inventory.slot_ref(1).unwrap(),
            ItemStackSnapshot::empty(),
            snapshot("minecraft:dirt", 1),
        );

        assert_eq!(a, same_slot);
        assert_ne!(a, other_slot);
    }
}
