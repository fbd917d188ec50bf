//! Inventory change events.

use chrono::{DateTime, Utc};
use tracing::debug;

use invkit_core::{ContainerId, PlayerId};
use invkit_inventory::{
    Builder, Container, InventoryTransactionResult, SlotTransaction, TransactionType,
};

use crate::event::{Cancellable, Event};

/// A player's action changed slots in an open container.
///
/// Listeners may adjust individual transactions (custom replacements,
/// invalidation) or cancel the whole event; the host then applies or restores
/// the affected slots accordingly.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeInventoryEvent {
    container: ContainerId,
    player: PlayerId,
    transactions: Vec<SlotTransaction>,
    cancelled: bool,
    occurred_at: DateTime<Utc>,
}

impl ChangeInventoryEvent {
    pub fn new(
        container: &dyn Container,
        transactions: Vec<SlotTransaction>,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            container: container.id(),
            player: container.viewer(),
            transactions,
            cancelled: false,
            occurred_at,
        }
    }

    pub fn container(&self) -> ContainerId {
        self.container
    }

    pub fn transactions(&self) -> &[SlotTransaction] {
        &self.transactions
    }

    pub fn transactions_mut(&mut self) -> &mut [SlotTransaction] {
        &mut self.transactions
    }

    /// Mark every transaction invalid so none of them is kept.
    pub fn invalidate_all(&mut self) {
        debug!(
            container = %self.container,
            transactions = self.transactions.len(),
            "invalidating all slot transactions"
        );
        for tx in &mut self.transactions {
            tx.set_valid(false);
        }
    }

    /// The event's transactions as a transaction result.
    ///
    /// `Failure` when the event is cancelled or any transaction was
    /// invalidated, so [`InventoryTransactionResult::revert_on_failure`] undoes
    /// the change.
    pub fn result(&self) -> InventoryTransactionResult {
        let vetoed = self.cancelled || self.transactions.iter().any(|tx| !tx.is_valid());
        let result_type = if vetoed {
            TransactionType::Failure
        } else {
            TransactionType::Success
        };
        Builder::new()
            .transactions(self.transactions.iter().cloned())
            .build_with(result_type)
    }
}

impl Event for ChangeInventoryEvent {
    fn event_type(&self) -> &'static str {
        "inventory.change"
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn cause(&self) -> PlayerId {
        self.player
    }
}

impl Cancellable for ChangeInventoryEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use invkit_inventory::{Inventory, ItemStack, ItemType, MemoryContainer, MemoryInventory};

    fn stone(quantity: u32) -> ItemStack {
        ItemStack::new(ItemType::new("minecraft:stone"), quantity)
    }

    fn opened_with_offer() -> (Arc<MemoryInventory>, MemoryContainer, ChangeInventoryEvent) {
        let inventory = Arc::new(MemoryInventory::new(2));
        let grid = Arc::new(MemoryInventory::new(1));
        let container = MemoryContainer::open(PlayerId::new(), Arc::clone(&inventory), grid);
        let offered = inventory.offer(stone(70));
        let event = ChangeInventoryEvent::new(
            &container,
            offered.slot_transactions().to_vec(),
            Utc::now(),
        );
        (inventory, container, event)
    }

    #[test]
    fn uncancelled_event_reports_success() {
        let (_inventory, container, event) = opened_with_offer();
        assert_eq!(event.event_type(), "inventory.change");
        assert_eq!(event.container(), container.id());
        assert_eq!(event.cause(), container.viewer());

        let result = event.result();
        assert_eq!(result.result_type(), TransactionType::Success);
        assert_eq!(result.slot_transactions(), event.transactions());
    }

    #[test]
    fn cancelled_event_reverts_through_its_result() {
        let (inventory, _container, mut event) = opened_with_offer();
        event.set_cancelled(true);

        let result = event.result();
        assert_eq!(result.result_type(), TransactionType::Failure);
        result.revert_on_failure().unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn invalidating_any_transaction_is_a_failure() {
        let (_inventory, _container, mut event) = opened_with_offer();
        event.transactions_mut()[1].set_valid(false);
        assert_eq!(event.result().result_type(), TransactionType::Failure);

        event.invalidate_all();
        assert!(event.transactions().iter().all(|tx| !tx.is_valid()));
    }
}
