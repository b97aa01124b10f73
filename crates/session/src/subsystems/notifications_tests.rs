// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sable_adapters::{FakeNotifyAdapter, NotifyCall};
use sable_storage::{CachedRoom, GeneralStore};
use tempfile::tempdir;

fn rooms() -> RoomIndex {
    let dir = tempdir().unwrap();
    let store = GeneralStore::open(dir.path()).unwrap();
    store
        .put_room(CachedRoom::new("!a:hs").with_name("General"))
        .unwrap();
    RoomIndex::from_store(&store)
}

#[tokio::test]
async fn inactive_until_rearmed() {
    let notifier = FakeNotifyAdapter::new();
    let dispatcher = NotificationDispatcher::new(notifier.clone(), rooms(), &Settings::default());

    assert!(!dispatcher.notify_message("!a:hs", "@bob:hs", "hi").await.unwrap());
    assert!(dispatcher.rearm().await);
    assert!(dispatcher.notify_message("!a:hs", "@bob:hs", "hi").await.unwrap());

    assert_eq!(
        notifier.calls(),
        vec![NotifyCall {
            title: "General".to_string(),
            message: "@bob:hs: hi".to_string(),
        }]
    );
}

#[tokio::test]
async fn disabled_in_settings_never_notifies() {
    let notifier = FakeNotifyAdapter::new();
    let settings = Settings {
        show_notifications: false,
        ..Settings::default()
    };
    let dispatcher = NotificationDispatcher::new(notifier.clone(), rooms(), &settings);

    dispatcher.rearm().await;

    assert!(!dispatcher.is_active());
    assert!(!dispatcher.notify_message("!a:hs", "@bob:hs", "hi").await.unwrap());
    assert!(notifier.calls().is_empty());
}

#[tokio::test]
async fn revoked_grant_is_picked_up_on_rearm() {
    let notifier = FakeNotifyAdapter::new();
    let dispatcher = NotificationDispatcher::new(notifier.clone(), rooms(), &Settings::default());
    dispatcher.rearm().await;

    notifier.set_granted(false);
    assert!(!dispatcher.rearm().await);

    assert!(!dispatcher.is_active());
    assert_eq!(dispatcher.rearm_count(), 2);
    assert_eq!(notifier.permission_requests(), 2);
}

#[tokio::test]
async fn unknown_room_falls_back_to_id() {
    let notifier = FakeNotifyAdapter::new();
    let dispatcher = NotificationDispatcher::new(notifier.clone(), rooms(), &Settings::default());
    dispatcher.rearm().await;

    dispatcher
        .notify_message("!other:hs", "@bob:hs", "yo")
        .await
        .unwrap();

    assert_eq!(notifier.calls()[0].title, "!other:hs");
}
