//! Item interaction events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invkit_core::PlayerId;
use invkit_inventory::ItemStackSnapshot;

use crate::event::{Cancellable, Event};

/// Which hand held the item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandType {
    Main,
    Off,
}

/// Primary (attack / left-click) or secondary (use / right-click).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractKind {
    Primary,
    Secondary,
}

/// A point in world space.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector3d {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3d {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A player used the item in one of their hands.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractItemEvent {
    player: PlayerId,
    hand: HandType,
    kind: InteractKind,
    item: ItemStackSnapshot,
    interaction_point: Option<Vector3d>,
    cancelled: bool,
    occurred_at: DateTime<Utc>,
}

impl InteractItemEvent {
    pub fn new(
        player: PlayerId,
        hand: HandType,
        kind: InteractKind,
        item: ItemStackSnapshot,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            player,
            hand,
            kind,
            item,
            interaction_point: None,
            cancelled: false,
            occurred_at,
        }
    }

    /// Where the interaction ray hit, if it hit anything.
    pub fn with_interaction_point(mut self, point: Vector3d) -> Self {
        self.interaction_point = Some(point);
        self
    }

    pub fn hand(&self) -> HandType {
        self.hand
    }

    pub fn kind(&self) -> InteractKind {
        self.kind
    }

    /// The item as it was when the interaction began.
    pub fn item(&self) -> &ItemStackSnapshot {
        &self.item
    }

    pub fn interaction_point(&self) -> Option<Vector3d> {
        self.interaction_point
    }
}

impl Event for InteractItemEvent {
    fn event_type(&self) -> &'static str {
        match self.kind {
            InteractKind::Primary => "interact.item.primary",
            InteractKind::Secondary => "interact.item.secondary",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn cause(&self) -> PlayerId {
        self.player
    }
}

/// Cancelling stops the host from applying the item's use.
impl Cancellable for InteractItemEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invkit_inventory::{ItemStack, ItemType};

    fn sword() -> ItemStackSnapshot {
        ItemStack::new(ItemType::new("minecraft:iron_sword"), 1).create_snapshot()
    }

    #[test]
    fn event_type_follows_interaction_kind() {
        let player = PlayerId::new();
        let primary = InteractItemEvent::new(
            player,
            HandType::Main,
            InteractKind::Primary,
            sword(),
            Utc::now(),
        );
        let secondary = InteractItemEvent::new(
            player,
            HandType::Off,
            InteractKind::Secondary,
            sword(),
            Utc::now(),
        );

        assert_eq!(primary.event_type(), "interact.item.primary");
        assert_eq!(secondary.event_type(), "interact.item.secondary");
        assert_eq!(secondary.cause(), player);
    }

    #[test]
    fn cancellation_is_reversible() {
        let mut event = InteractItemEvent::new(
            PlayerId::new(),
            HandType::Main,
            InteractKind::Secondary,
            sword(),
            Utc::now(),
        )
        .with_interaction_point(Vector3d::new(1.5, 64.0, -3.25));

        assert!(!event.is_cancelled());
        event.set_cancelled(true);
        assert!(event.is_cancelled());
        event.set_cancelled(false);
        assert!(!event.is_cancelled());
        assert_eq!(event.interaction_point(), Some(Vector3d::new(1.5, 64.0, -3.25)));
    }

    #[test]
    fn hand_and_kind_serialize_snake_case() {
        assert_eq!(serde_json::to_string(&HandType::Off).unwrap(), "\"off\"");
        assert_eq!(
            serde_json::to_string(&InteractKind::Primary).unwrap(),
            "\"primary\""
        );
    }
}
