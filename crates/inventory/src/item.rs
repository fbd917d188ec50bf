use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use invkit_core::ValueObject;

/// Namespaced item type key (e.g. `"minecraft:stone"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemType(Cow<'static, str>);

impl ItemType {
    /// The "no item" type. Stacks of this type are always empty.
    pub const NONE: ItemType = ItemType(Cow::Borrowed("minecraft:air"));

    pub fn new(key: impl Into<Cow<'static, str>>) -> Self {
        Self(key.into())
    }

    pub fn key(&self) -> &str {
        &self.0
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl core::fmt::Display for ItemType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A live, mutable quantity of one item type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    item_type: ItemType,
    quantity: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    data: BTreeMap<String, Value>,
}

impl ItemStack {
    pub fn new(item_type: ItemType, quantity: u32) -> Self {
        Self {
            item_type,
            quantity,
            data: BTreeMap::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(ItemType::NONE, 0)
    }

    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    pub fn item_type(&self) -> &ItemType {
        &self.item_type
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub fn data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// True for the "no item" type or a zero quantity.
    pub fn is_empty(&self) -> bool {
        self.item_type.is_none() || self.quantity == 0
    }

    /// Same item type and custom data; quantity is ignored.
    pub fn is_similar(&self, other: &ItemStack) -> bool {
        self.item_type == other.item_type && self.data == other.data
    }

    pub fn create_snapshot(&self) -> ItemStackSnapshot {
        ItemStackSnapshot {
            item_type: self.item_type.clone(),
            quantity: self.quantity,
            data: self.data.clone(),
        }
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::empty()
    }
}

impl ValueObject for ItemStack {}

/// Immutable, point-in-time capture of an [`ItemStack`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStackSnapshot {
    item_type: ItemType,
    quantity: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    data: BTreeMap<String, Value>,
}

impl ItemStackSnapshot {
    pub fn empty() -> Self {
        Self {
            item_type: ItemType::NONE,
            quantity: 0,
            data: BTreeMap::new(),
        }
    }

    pub fn item_type(&self) -> &ItemType {
        &self.item_type
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn data(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.item_type.is_none() || self.quantity == 0
    }

    /// Materialises a fresh live stack; the snapshot is left untouched.
    pub fn create_stack(&self) -> ItemStack {
        ItemStack {
            item_type: self.item_type.clone(),
            quantity: self.quantity,
            data: self.data.clone(),
        }
    }
}

impl Default for ItemStackSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl ValueObject for ItemStackSnapshot {}

impl From<ItemStack> for ItemStackSnapshot {
    fn from(stack: ItemStack) -> Self {
        Self {
            item_type: stack.item_type,
            quantity: stack.quantity,
            data: stack.data,
        }
    }
}

impl From<&ItemStack> for ItemStackSnapshot {
    fn from(stack: &ItemStack) -> Self {
        stack.create_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stone(quantity: u32) -> ItemStack {
        ItemStack::new(ItemType::new("minecraft:stone"), quantity)
    }

    #[test]
    fn air_and_zero_quantity_are_empty() {
        assert!(ItemStack::empty().is_empty());
        assert!(stone(0).is_empty());
        assert!(ItemStack::new(ItemType::NONE, 12).is_empty());
        assert!(!stone(1).is_empty());
    }

    #[test]
    fn snapshot_is_detached_from_the_live_stack() {
        let mut stack = stone(8);
        let snapshot = stack.create_snapshot();
        stack.set_quantity(1);

        assert_eq!(snapshot.quantity(), 8);
        assert_eq!(snapshot.create_stack(), stone(8));
    }

    #[test]
    fn similarity_considers_custom_data() {
        let plain = stone(1);
        let named = stone(4).with_data("display_name", json!("Cornerstone"));
        assert!(plain.is_similar(&stone(64)));
        assert!(!plain.is_similar(&named));
    }

    #[test]
    fn snapshot_serializes_without_empty_data() {
        let snapshot = stone(3).create_snapshot();
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value, json!({ "item_type": "minecraft:stone", "quantity": 3 }));

        let back: ItemStackSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(back, snapshot);
    }
}
