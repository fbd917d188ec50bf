use chrono::{DateTime, Utc};

use invkit_core::PlayerId;

/// An interaction event posted by the host.
///
/// Events are facts about something a player did. Dispatching them to
/// listeners is the host's job; this crate only defines their shape.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "interact.item.primary").
    fn event_type(&self) -> &'static str;

    /// When the event occurred (server time).
    fn occurred_at(&self) -> DateTime<Utc>;

    /// The player whose action caused the event.
    fn cause(&self) -> PlayerId;
}

/// Events a listener may veto.
///
/// A cancelled event tells the host not to carry out the action; what undoing
/// means for each event is documented on the event type.
pub trait Cancellable {
    fn is_cancelled(&self) -> bool;

    fn set_cancelled(&mut self, cancelled: bool);
}
