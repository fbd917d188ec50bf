//! Inventory capability trait.

use tracing::warn;

use crate::item::{ItemStack, ItemType};
use crate::slot::{SlotRef, SlotTransaction};
use crate::transaction::{Builder, InventoryTransactionResult, TransactionType};

/// Default per-slot stack limit when the host does not override it.
pub const DEFAULT_MAX_STACK_QUANTITY: u32 = 64;

/// An ordered collection of slots, implemented by the host.
///
/// Only [`capacity`](Inventory::capacity) and [`slot`](Inventory::slot) are
/// required; the provided methods are expressed purely through slot reads and
/// writes and report their outcome as an [`InventoryTransactionResult`].
pub trait Inventory: core::fmt::Debug + Send + Sync {
    fn capacity(&self) -> usize;

    /// Shared handle to the slot at `index`. Repeated calls for the same index
    /// must return the same handle.
    fn slot(&self, index: usize) -> Option<SlotRef>;

    fn max_stack_quantity(&self) -> u32 {
        DEFAULT_MAX_STACK_QUANTITY
    }

    fn slots(&self) -> Vec<SlotRef> {
        (0..self.capacity()).filter_map(|i| self.slot(i)).collect()
    }

    fn peek_at(&self, index: usize) -> Option<ItemStack> {
        self.slot(index).map(|slot| slot.peek())
    }

    fn is_empty(&self) -> bool {
        self.slots().iter().all(|slot| slot.is_empty())
    }

    /// Total quantity of `item_type` across all slots.
    fn quantity_of(&self, item_type: &ItemType) -> u64 {
        self.slots()
            .iter()
            .map(|slot| slot.peek())
            .filter(|stack| !stack.is_empty() && stack.item_type() == item_type)
            .map(|stack| u64::from(stack.quantity()))
            .sum()
    }

    /// Replace the contents of the slot at `index`.
    ///
    /// An out-of-range index rejects the stack as `Failure`; a failed host
    /// write rejects it as `Error`.
    fn set(&self, index: usize, stack: ItemStack) -> InventoryTransactionResult {
        let mut builder = Builder::new();
        let Some(slot) = self.slot(index) else {
            return builder.reject([stack]).build_with(TransactionType::Failure);
        };

        let original = slot.peek().create_snapshot();
        let replacement = stack.create_snapshot();
        if let Err(err) = slot.set(stack) {
            warn!(slot = index, error = %err, "slot write failed");
            return builder
                .reject([replacement])
                .build_with(TransactionType::Error);
        }
        builder
            .transaction(SlotTransaction::new(slot, original, replacement))
            .build_with(TransactionType::Success)
    }

    /// Add `stack` to the inventory, topping up similar stacks first and then
    /// filling empty slots.
    ///
    /// Whatever does not fit is rejected and the result is `Failure`. A failed
    /// host write stops the offer and reports `Error` with the transactions
    /// applied so far.
    fn offer(&self, stack: ItemStack) -> InventoryTransactionResult {
        if stack.is_empty() {
            return InventoryTransactionResult::success_no_transactions();
        }

        let limit = self.max_stack_quantity();
        let mut remaining = stack;
        let mut builder = Builder::new();
        let slots = self.slots();

        let prototype = remaining.clone();
        let merge_targets = slots.iter().filter(|slot| {
            let current = slot.peek();
            !current.is_empty() && current.is_similar(&prototype)
        });
        let empty_targets = slots.iter().filter(|slot| slot.is_empty());

        for slot in merge_targets.chain(empty_targets) {
            if remaining.is_empty() {
                break;
            }
            let current = slot.peek();
            let held = if current.is_empty() { 0 } else { current.quantity() };
            let take = limit.saturating_sub(held).min(remaining.quantity());
            if take == 0 {
                continue;
            }

            let mut placed = remaining.clone();
            placed.set_quantity(held + take);
            let original = current.create_snapshot();
            let replacement = placed.create_snapshot();
            if let Err(err) = slot.set(placed) {
                warn!(slot = slot.index(), error = %err, "offer stopped on slot write failure");
                return builder
                    .reject([remaining])
                    .build_with(TransactionType::Error);
            }
            remaining.set_quantity(remaining.quantity() - take);
            builder.transaction(SlotTransaction::new(slot.clone(), original, replacement));
        }

        if remaining.is_empty() {
            builder.build_with(TransactionType::Success)
        } else {
            builder.reject([remaining]).build_with(TransactionType::Failure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryInventory;

    fn stone(quantity: u32) -> ItemStack {
        ItemStack::new(ItemType::new("minecraft:stone"), quantity)
    }

    #[test]
    fn offer_tops_up_similar_stacks_before_empty_slots() {
        let inventory = MemoryInventory::new(3);
        inventory.set(2, stone(60));

        let result = inventory.offer(stone(10));
        assert!(result.is_success());
        assert_eq!(inventory.peek_at(2), Some(stone(64)));
        assert_eq!(inventory.peek_at(0), Some(stone(6)));
        assert!(inventory.peek_at(1).unwrap().is_empty());
        assert_eq!(result.slot_transactions().len(), 2);
    }

    #[test]
    fn offer_rejects_leftover_and_reverting_restores_contents() {
        let inventory = MemoryInventory::new(2);
        inventory.set(0, stone(50));

        let result = inventory.offer(stone(100));
        assert_eq!(result.result_type(), TransactionType::Failure);
        assert_eq!(result.rejected_items(), &[stone(22).create_snapshot()]);
        assert_eq!(inventory.quantity_of(&ItemType::new("minecraft:stone")), 128);

        result.revert_on_failure().unwrap();
        assert_eq!(inventory.peek_at(0), Some(stone(50)));
        assert!(inventory.peek_at(1).unwrap().is_empty());
    }

    #[test]
    fn offer_of_empty_stack_is_a_no_op() {
        let inventory = MemoryInventory::new(1);
        let result = inventory.offer(ItemStack::empty());
        assert_eq!(result, InventoryTransactionResult::success_no_transactions());
        assert!(inventory.write_log().is_empty());
    }

    #[test]
    fn offer_reports_error_when_a_write_fails() {
        let inventory = MemoryInventory::new(2);
        inventory.fail_writes_to(1);

        let result = inventory.offer(stone(100));
        assert_eq!(result.result_type(), TransactionType::Error);
        assert_eq!(result.slot_transactions().len(), 1);
        assert_eq!(result.rejected_items(), &[stone(36).create_snapshot()]);
    }

    #[test]
    fn offer_respects_the_inventory_stack_limit() {
        let inventory = MemoryInventory::new(3).with_max_stack_quantity(16);

        let result = inventory.offer(stone(40));
        assert!(result.is_success());
        assert_eq!(inventory.peek_at(0), Some(stone(16)));
        assert_eq!(inventory.peek_at(1), Some(stone(16)));
        assert_eq!(inventory.peek_at(2), Some(stone(8)));

        let overflow = inventory.offer(stone(10));
        assert!(!overflow.is_success());
        assert_eq!(overflow.rejected_items(), &[stone(2).create_snapshot()]);
    }

    #[test]
    fn set_rejects_the_stack_when_the_write_fails() {
        let inventory = MemoryInventory::new(1);
        inventory.fail_writes_to(0);

        let result = inventory.set(0, stone(3));
        assert_eq!(result.result_type(), TransactionType::Error);
        assert_eq!(result.rejected_items(), &[stone(3).create_snapshot()]);
        assert!(result.slot_transactions().is_empty());
        assert!(inventory.is_empty());
    }

    #[test]
    fn set_out_of_range_is_failure() {
        let inventory = MemoryInventory::new(1);
        let result = inventory.set(5, stone(1));
        assert_eq!(result.result_type(), TransactionType::Failure);
        assert_eq!(result.rejected_items(), &[stone(1).create_snapshot()]);
    }
}
