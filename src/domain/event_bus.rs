//! Broadcast channel for state snapshot events.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every mutating
//! operation publishes a [`StateSnapshotEvent`] through the bus, and every
//! WebSocket connection subscribes to forward them to its client.

use tokio::sync::broadcast;

use super::StateSnapshotEvent;

/// Broadcast bus for [`StateSnapshotEvent`]s.
///
/// When the ring buffer is full, the oldest events are dropped for
/// lagging receivers. Since every event is a full snapshot, a lagging
/// client only needs the latest one.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<StateSnapshotEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event to all subscribers.
    ///
    /// Returns the number of receivers that received the event.
    /// If there are no active receivers, the event is silently dropped.
    pub fn publish(&self, event: StateSnapshotEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a new receiver that will receive all future events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StateSnapshotEvent> {
        self.sender.subscribe()
    }
}
