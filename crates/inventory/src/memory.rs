//! In-memory collaborators for tests/dev.
//!
//! Hosts provide their own slots and inventories; these exist so transaction
//! results can be exercised without a running server. Every slot write is
//! recorded in a shared log so write order is observable.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::debug;

use invkit_core::{ApiError, ApiResult, ContainerId, PlayerId};

use crate::container::Container;
use crate::inventory::Inventory;
use crate::item::ItemStack;
use crate::slot::{Slot, SlotRef};
use crate::transaction::InventoryTransactionResult;

type WriteLog = Arc<Mutex<Vec<(usize, ItemStack)>>>;
type FailingSlots = Arc<Mutex<HashSet<usize>>>;

/// A slot backed by a mutex.
#[derive(Debug)]
pub struct MemorySlot {
    index: usize,
    stack: Mutex<ItemStack>,
    log: WriteLog,
    failing: FailingSlots,
}

impl Slot for MemorySlot {
    fn index(&self) -> usize {
        self.index
    }

    fn peek(&self) -> ItemStack {
        // A poisoned slot still holds the last written stack.
        match self.stack.lock() {
            Ok(stack) => stack.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn set(&self, stack: ItemStack) -> ApiResult<()> {
        let failing = self.failing.lock().map_err(|_| ApiError::Poisoned)?;
        if failing.contains(&self.index) {
            return Err(ApiError::slot_write(self.index, "slot is locked"));
        }
        drop(failing);

        let mut current = self.stack.lock().map_err(|_| ApiError::Poisoned)?;
        *current = stack.clone();
        drop(current);

        self.log
            .lock()
            .map_err(|_| ApiError::Poisoned)?
            .push((self.index, stack));
        Ok(())
    }
}

/// A fixed-size inventory of [`MemorySlot`]s.
#[derive(Debug)]
pub struct MemoryInventory {
    slots: Vec<Arc<MemorySlot>>,
    max_stack_quantity: u32,
    log: WriteLog,
    failing: FailingSlots,
}

impl MemoryInventory {
    pub fn new(capacity: usize) -> Self {
        let log = WriteLog::default();
        let failing = FailingSlots::default();
        let slots = (0..capacity)
            .map(|index| {
                Arc::new(MemorySlot {
                    index,
                    stack: Mutex::new(ItemStack::empty()),
                    log: Arc::clone(&log),
                    failing: Arc::clone(&failing),
                })
            })
            .collect();
        Self {
            slots,
            max_stack_quantity: crate::inventory::DEFAULT_MAX_STACK_QUANTITY,
            log,
            failing,
        }
    }

    pub fn with_max_stack_quantity(mut self, max: u32) -> Self {
        self.max_stack_quantity = max;
        self
    }

    /// Type-erased handle to a slot, as a host would hand it out.
    pub fn slot_ref(&self, index: usize) -> Option<SlotRef> {
        self.slots
            .get(index)
            .map(|slot| Arc::clone(slot) as SlotRef)
    }

    /// Make every later write to `index` fail.
    pub fn fail_writes_to(&self, index: usize) {
        if let Ok(mut failing) = self.failing.lock() {
            failing.insert(index);
        }
    }

    /// `(slot index, written stack)` pairs in write order.
    pub fn write_log(&self) -> Vec<(usize, ItemStack)> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn clear_write_log(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.clear();
        }
    }
}

impl Inventory for MemoryInventory {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, index: usize) -> Option<SlotRef> {
        self.slot_ref(index)
    }

    fn max_stack_quantity(&self) -> u32 {
        self.max_stack_quantity
    }
}

/// A single inventory opened by one viewer, with that viewer's own grid and
/// cursor.
#[derive(Debug)]
pub struct MemoryContainer {
    id: ContainerId,
    viewer: PlayerId,
    inventory: Arc<MemoryInventory>,
    player_inventory: Arc<MemoryInventory>,
    open: Mutex<bool>,
    cursor: Mutex<Option<ItemStack>>,
}

impl MemoryContainer {
    pub fn open(
        viewer: PlayerId,
        inventory: Arc<MemoryInventory>,
        player_inventory: Arc<MemoryInventory>,
    ) -> Self {
        Self {
            id: ContainerId::new(),
            viewer,
            inventory,
            player_inventory,
            open: Mutex::new(true),
            cursor: Mutex::new(None),
        }
    }

    /// The viewer's own grid. Never part of [`Container::viewed`].
    pub fn player_inventory(&self) -> &Arc<MemoryInventory> {
        &self.player_inventory
    }

    /// End the viewing session. A stack left on the cursor is offered back to
    /// the viewer's grid; the returned result describes that offer.
    pub fn close(&self) -> InventoryTransactionResult {
        if let Ok(mut open) = self.open.lock() {
            *open = false;
        }
        let held = match self.cursor.lock() {
            Ok(mut cursor) => cursor.take(),
            Err(_) => None,
        };
        match held {
            Some(stack) => {
                debug!(container = %self.id, "returning cursor stack on close");
                self.player_inventory.offer(stack)
            }
            None => InventoryTransactionResult::success_no_transactions(),
        }
    }
}

impl Container for MemoryContainer {
    fn id(&self) -> ContainerId {
        self.id
    }

    fn viewer(&self) -> PlayerId {
        self.viewer
    }

    fn viewed(&self) -> Vec<Arc<dyn Inventory>> {
        vec![Arc::clone(&self.inventory) as Arc<dyn Inventory>]
    }

    fn is_open(&self) -> bool {
        self.open.lock().map(|open| *open).unwrap_or(false)
    }

    fn set_cursor(&self, stack: ItemStack) -> ApiResult<()> {
        if !self.is_open() {
            return Err(ApiError::invalid_state("container is closed"));
        }
        let mut cursor = self.cursor.lock().map_err(|_| ApiError::Poisoned)?;
        *cursor = if stack.is_empty() { None } else { Some(stack) };
        Ok(())
    }

    fn cursor(&self) -> Option<ItemStack> {
        if !self.is_open() {
            return None;
        }
        self.cursor.lock().ok().and_then(|cursor| cursor.clone())
    }
}
