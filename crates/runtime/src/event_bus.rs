//! In-process event fan-out (§4.10, §5).
//!
//! Delivery is asynchronous and best-effort: `publish` never blocks on a
//! slow subscriber. Each subscription gets its own bounded queue; a queue
//! that fills up drops the event with a warning rather than applying
//! back-pressure to the producer.

use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::sync::Mutex;

use prizm_core::Event;

/// Bound on each subscriber's queue before events start getting dropped.
const QUEUE_CAPACITY: usize = 256;

struct Subscriber {
    /// Topic prefix this subscriber cares about (e.g. `"document:"`), or
    /// empty to receive every event.
    topic_prefix: String,
    sender: SyncSender<Event>,
}

/// A live subscription's receiving end. Dropping it unsubscribes: the next
/// `publish` finds the channel disconnected and removes the slot.
pub type Subscription = Receiver<Event>;

/// Lock-free-to-producers fan-out of [`Event`]s to any number of
/// subscribers (§4.10).
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe to every event whose topic starts with `topic_prefix`
    /// (e.g. `"document:"`, `"resource:"`). An empty prefix matches every
    /// topic.
    pub fn subscribe(&self, topic_prefix: impl Into<String>) -> Subscription {
        let (tx, rx) = mpsc::sync_channel(QUEUE_CAPACITY);
        let mut subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subs.push(Subscriber {
            topic_prefix: topic_prefix.into(),
            sender: tx,
        });
        rx
    }

    /// Deliver `event` to every matching subscriber. Full queues drop the
    /// event; disconnected subscribers (their `Subscription` was dropped)
    /// are pruned.
    pub fn publish(&self, event: Event) {
        let mut subs = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subs.retain(|sub| {
            if !sub.topic_prefix.is_empty() && !event.name().starts_with(sub.topic_prefix.as_str()) {
                return true;
            }
            match sub.sender.try_send(event.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(topic = event.name(), "event bus subscriber queue full, dropping event");
                    true
                }
                Err(TrySendError::Disconnected(_)) => false,
            }
        });
    }

    /// Number of live subscriptions, mostly useful for tests.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
#[path = "event_bus_tests.rs"]
mod tests;
