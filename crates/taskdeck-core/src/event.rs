//! Application-wide events.
//!
//! The original design relied on a global event target; here the broadcast
//! is an explicit publish/subscribe value injected into the components that
//! need it, so tests can build an isolated bus per case.

use tokio::sync::broadcast;

/// Cross-component signals.
///
/// These are the only two signals that cross component boundaries. Neither
/// carries a payload: `TasksChanged` tells task views their data may be
/// stale (refetch, never ship the changed data itself), and `Unauthorized`
/// forces every holder of session state to settle to unauthenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Task data may be stale; subscribed views should refetch.
    TasksChanged,
    /// A backend call was rejected for a missing or invalid credential.
    Unauthorized,
}

/// Buffer depth per subscriber. A lagged subscriber drops the oldest
/// events and resynchronizes on the next receive, which is harmless for
/// payload-free refresh signals.
const EVENT_CAPACITY: usize = 16;

/// A process-wide, fire-and-forget broadcast of [`AppEvent`]s.
///
/// Cloning shares the underlying channel. Dropping a receiver unsubscribes
/// it, so components unsubscribe naturally on teardown.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    /// Creates a new bus with no subscribers.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    /// Publishes an event to all current subscribers.
    ///
    /// Publishing with no subscribers is not an error; the event is simply
    /// dropped.
    pub fn publish(&self, event: AppEvent) {
        let _ = self.sender.send(event);
    }

    /// Registers a new subscriber.
    ///
    /// The subscription only sees events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
