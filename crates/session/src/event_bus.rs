// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event bus for lifecycle announcements.
//!
//! The session controller publishes [`LifecycleEvent`]s; logout handlers,
//! reload triggers and status displays subscribe by [`Topic`]. Listeners are
//! registered and unregistered explicitly. Delivery never blocks the
//! publisher: each subscriber has its own unbounded queue.

use std::sync::Arc;

use parking_lot::Mutex;
use sable_core::{LifecycleEvent, Topic};
use tokio::sync::mpsc;

/// Identifies one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscriber {
    id: SubscriptionId,
    topic: Topic,
    tx: mpsc::UnboundedSender<LifecycleEvent>,
}

#[derive(Default)]
struct BusState {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

/// Publish/subscribe channel owned by the session controller.
///
/// Clones share the same set of subscribers.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Mutex<BusState>>,
}

/// Receiving side of one registration.
///
/// Dropping it unregisters lazily on the next publish; call
/// [`EventBus::unsubscribe`] to unregister immediately.
pub struct Subscription {
    id: SubscriptionId,
    topic: Topic,
    rx: mpsc::UnboundedReceiver<LifecycleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for events matching `topic`.
    pub fn subscribe(&self, topic: Topic) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.subscribers.push(Subscriber { id, topic, tx });
        Subscription { id, topic, rx }
    }

    /// Unregister a listener. Returns whether it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|s| s.id != id);
        inner.subscribers.len() != before
    }

    /// Deliver `event` to every matching listener.
    ///
    /// Returns the number of listeners that received it. Listeners whose
    /// receiving side was dropped are unregistered.
    pub fn publish(&self, event: LifecycleEvent) -> usize {
        let mut inner = self.inner.lock();
        let mut delivered = 0;
        inner.subscribers.retain(|s| {
            if !s.topic.matches(&event) {
                return !s.tx.is_closed();
            }
            match s.tx.send(event.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => false,
            }
        });
        tracing::debug!(event = event.name(), delivered, "published");
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    /// Wait for the next event. Returns `None` once the bus is gone.
    pub async fn recv(&mut self) -> Option<LifecycleEvent> {
        self.rx.recv().await
    }

    /// Next already-delivered event, if any.
    pub fn try_recv(&mut self) -> Option<LifecycleEvent> {
        self.rx.try_recv().ok()
    }

    /// Every already-delivered event, oldest first.
    pub fn drain(&mut self) -> Vec<LifecycleEvent> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }
}

#[cfg(test)]
#[path = "event_bus_tests.rs"]
mod tests;
