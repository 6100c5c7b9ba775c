use crate::theme::types::ThemeChange;
use tokio::sync::broadcast;

/// Default number of change events buffered per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 16;

/// Fire-and-forget publisher of theme change events.
pub trait EventSink: Send + Sync {
    fn publish(&self, change: ThemeChange);
}

/// No event channel attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct InertSink;

impl EventSink for InertSink {
    fn publish(&self, _change: ThemeChange) {}
}

/// In-process event bus backed by a tokio broadcast channel.
///
/// Subscribers registered after a publish do not see earlier events, and a
/// publish with nobody listening is simply dropped.
#[derive(Debug, Clone)]
pub struct BroadcastBus {
    tx: broadcast::Sender<ThemeChange>,
}

impl BroadcastBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ThemeChange> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

impl EventSink for BroadcastBus {
    fn publish(&self, change: ThemeChange) {
        match self.tx.send(change) {
            Ok(receivers) => log::trace!("Theme change {change:?} delivered to {receivers} listeners"),
            Err(_) => log::trace!("Theme change {change:?} published with no listeners"),
        }
    }
}
