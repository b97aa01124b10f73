// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sable_core::SyncState;
use yare::parameterized;

fn sync_event() -> LifecycleEvent {
    LifecycleEvent::SyncStateChanged {
        current: SyncState::Syncing,
        previous: Some(SyncState::Null),
    }
}

#[parameterized(
    init_on_init = { Topic::InitLoadingFinished, LifecycleEvent::InitLoadingFinished, true },
    init_on_sync = { Topic::InitLoadingFinished, sync_event(), false },
    sync_on_sync = { Topic::SyncState, sync_event(), true },
    teardown_on_logout = { Topic::Teardown, LifecycleEvent::LoggedOut, true },
    teardown_on_invalidated = { Topic::Teardown, LifecycleEvent::SessionInvalidated, true },
    teardown_on_init = { Topic::Teardown, LifecycleEvent::InitLoadingFinished, false },
    all_on_cache_cleared = { Topic::All, LifecycleEvent::CacheCleared, true },
)]
fn delivers_by_topic(topic: Topic, event: LifecycleEvent, expected: bool) {
    let bus = EventBus::new();
    let mut sub = bus.subscribe(topic);

    let delivered = bus.publish(event.clone());

    assert_eq!(delivered, usize::from(expected));
    assert_eq!(sub.try_recv(), expected.then_some(event));
}

#[test]
fn unsubscribe_stops_delivery() {
    let bus = EventBus::new();
    let mut sub = bus.subscribe(Topic::All);

    assert!(bus.unsubscribe(sub.id()));
    assert!(!bus.unsubscribe(sub.id()));
    assert_eq!(bus.publish(LifecycleEvent::LoggedOut), 0);
    assert_eq!(sub.try_recv(), None);
}

#[test]
fn dropped_subscription_is_pruned_on_publish() {
    let bus = EventBus::new();
    let kept = bus.subscribe(Topic::All);
    drop(bus.subscribe(Topic::Teardown));
    assert_eq!(bus.subscriber_count(), 2);

    bus.publish(LifecycleEvent::CacheCleared);

    assert_eq!(bus.subscriber_count(), 1);
    drop(kept);
}

#[test]
fn clones_share_subscribers() {
    let bus = EventBus::new();
    let mut sub = bus.subscribe(Topic::All);

    bus.clone().publish(LifecycleEvent::InitLoadingFinished);
    bus.publish(LifecycleEvent::LoggedOut);

    assert_eq!(
        sub.drain(),
        vec![LifecycleEvent::InitLoadingFinished, LifecycleEvent::LoggedOut]
    );
}

#[tokio::test]
async fn recv_ends_when_bus_dropped() {
    let bus = EventBus::new();
    let mut sub = bus.subscribe(Topic::All);
    bus.publish(LifecycleEvent::LoggedOut);
    drop(bus);

    assert_eq!(sub.recv().await, Some(LifecycleEvent::LoggedOut));
    assert_eq!(sub.recv().await, None);
}
