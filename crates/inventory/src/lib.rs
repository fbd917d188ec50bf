//! Inventory API: item values, host capability traits and transaction results.
//!
//! Slots, inventories and containers are implemented by the host; this crate
//! only defines their contracts. The logic-bearing piece is
//! [`InventoryTransactionResult`], the uniform report every inventory-mutating
//! operation returns.

pub mod container;
pub mod inventory;
pub mod item;
pub mod memory;
pub mod slot;
pub mod transaction;

pub use container::Container;
pub use inventory::{DEFAULT_MAX_STACK_QUANTITY, Inventory};
pub use item::{ItemStack, ItemStackSnapshot, ItemType};
pub use memory::{MemoryContainer, MemoryInventory, MemorySlot};
pub use slot::{Slot, SlotRef, SlotTransaction};
pub use transaction::{Builder, InventoryTransactionResult, TransactionType};
