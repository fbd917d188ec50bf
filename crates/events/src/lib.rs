//! Interaction events.
//!
//! Payload shapes only: dispatching events to listeners belongs to the host.

pub mod change;
pub mod event;
pub mod interact;

pub use change::ChangeInventoryEvent;
pub use event::{Cancellable, Event};
pub use interact::{HandType, InteractItemEvent, InteractKind, Vector3d};
