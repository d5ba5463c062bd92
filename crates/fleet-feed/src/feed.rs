use tokio::sync::broadcast;
use tracing::debug;

use fleet_types::ChangeEvent;

/// Default capacity of the per-observer event buffer.
pub const DEFAULT_CAPACITY: usize = 256;

/// A broadcast receiver carrying change events for one observer.
pub type EventStream = broadcast::Receiver<ChangeEvent>;

/// Fan-out bus for record change events.
///
/// Built on a `tokio::sync::broadcast` channel: publishing never waits for
/// receivers, every subscriber sees events in publish order, and a
/// subscriber only sees events published after it subscribed. Receivers
/// that fall more than the channel capacity behind lose the oldest events;
/// dropped receivers deregister themselves.
#[derive(Clone, Debug)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    /// Create a feed whose observers buffer up to `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Register a new observer. It receives only events published from this
    /// point onward; there is no backfill.
    pub fn subscribe(&self) -> EventStream {
        self.sender.subscribe()
    }

    /// Publish an event to every current observer, fire-and-forget.
    ///
    /// The only send failure is "no observers connected", which is not an
    /// error for the publisher.
    pub fn publish(&self, event: ChangeEvent) {
        let kind = event.kind();
        let id = event.item().id.clone();
        match self.sender.send(event) {
            Ok(observers) => debug!(kind, id = %id, observers, "change event published"),
            Err(_) => debug!(kind, id = %id, "change event dropped, no observers"),
        }
    }

    /// Number of currently connected observers.
    pub fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
