// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn start_runs_steps_in_order() {
    let harness = Harness::new();
    let mut controller = harness.controller();

    controller.start().await.unwrap();

    assert!(controller.is_started());
    assert_eq!(harness.connector.connect_count(), 1);
    assert_eq!(
        harness.engine().calls(),
        vec![
            EngineCall::Subscribe,
            EngineCall::InitCrypto {
                device_id: "DEVICE".to_string()
            },
            EngineCall::Start {
                config: harness.config.options.sync.clone()
            },
        ]
    );
}

#[tokio::test]
async fn start_generates_and_persists_device_keys() {
    let harness = Harness::new();
    let mut controller = harness.controller();

    controller.start().await.unwrap();

    let keys = controller.stores().unwrap().crypto.device_keys().unwrap();
    assert_eq!(keys.device_id, "DEVICE");
    assert!(harness.crypto_bytes_on_disk().is_some());
}

#[tokio::test]
async fn second_start_is_a_no_op() {
    let harness = Harness::new();
    let mut controller = harness.prepared().await;

    controller.start().await.unwrap();
    controller.init().await.unwrap();

    assert_eq!(harness.connector.connect_count(), 1);
    assert_eq!(harness.engine().start_count(), 1);
    assert_eq!(harness.factory.builds(), 1);
}

#[tokio::test]
async fn store_open_error_leaves_nothing_allocated() {
    let harness = Harness::new();
    // A regular file where the general store directory should be
    std::fs::write(&harness.config.stores.general, b"not a directory").unwrap();
    let mut controller = harness.controller();

    let err = controller.start().await.unwrap_err();

    assert!(matches!(err, SessionError::StoreOpen(_)), "got {err:?}");
    assert!(!controller.is_started());
    assert!(controller.stores().is_none());
    assert!(controller.subsystems().is_none());
    assert_eq!(controller.state().current(), SyncState::Null);
    assert_eq!(harness.connector.connect_count(), 0);
    assert_eq!(harness.factory.attempts(), 0);
}

#[tokio::test]
async fn connect_failure_is_surfaced() {
    let harness = Harness::new();
    harness.connector.fail_connect("homeserver unreachable");
    let mut controller = harness.controller();

    let err = controller.start().await.unwrap_err();

    assert!(matches!(err, SessionError::Connect(_)), "got {err:?}");
    assert!(!controller.is_started());
}

#[tokio::test]
async fn crypto_failure_prevents_streaming() {
    let harness = Harness::new();
    harness.engine().fail_crypto("olm unavailable");
    let mut controller = harness.controller();

    let err = controller.start().await.unwrap_err();

    assert!(matches!(err, SessionError::CryptoInit(_)), "got {err:?}");
    assert_eq!(harness.engine().start_count(), 0);
    assert!(controller.stores().is_none());
    assert_eq!(controller.state(), SessionState::new());
}

#[tokio::test]
async fn keys_for_another_device_are_a_crypto_error() {
    let harness = Harness::new();
    CryptoStore::open(&harness.config.stores.crypto)
        .unwrap()
        .load_or_generate_keys(&"OTHER".into())
        .unwrap();
    let mut controller = harness.controller();

    let err = controller.start().await.unwrap_err();

    assert!(matches!(err, SessionError::CryptoInit(_)), "got {err:?}");
    assert!(!harness
        .engine()
        .calls()
        .iter()
        .any(|c| matches!(c, EngineCall::InitCrypto { .. })));
}

#[tokio::test]
async fn engine_start_failure_stops_engine() {
    let harness = Harness::new();
    harness.engine().fail_start("sync filter rejected");
    let mut controller = harness.controller();

    let err = controller.start().await.unwrap_err();

    assert!(matches!(err, SessionError::EngineStart(_)), "got {err:?}");
    assert_eq!(harness.engine().stop_count(), 1);
    assert!(!controller.is_started());
}

fn offline_controller(
    harness: &Harness,
) -> SessionController<OfflineSyncConnector, FakeNotifyAdapter, FakeReloader, CountingFactory> {
    SessionController::new(
        Harness::credentials(),
        &harness.config,
        ControllerDeps {
            connector: OfflineSyncConnector::new(),
            notifier: harness.notifier.clone(),
            reloader: harness.reloader.clone(),
            factory: harness.factory.clone(),
        },
    )
}

#[tokio::test]
async fn init_with_offline_engine_reaches_ready() {
    let harness = Harness::new();
    harness.seed();
    let mut controller = offline_controller(&harness);
    let mut init = controller.bus().subscribe(Topic::InitLoadingFinished);

    controller.init().await.unwrap();

    assert_eq!(init.try_recv(), Some(LifecycleEvent::InitLoadingFinished));
    assert_eq!(controller.state().current(), SyncState::Prepared);
    let subsystems = controller.subsystems().unwrap();
    assert_eq!(subsystems.room_index.display_name("!a:hs"), Some("General"));
    assert_eq!(harness.notifier.permission_requests(), 1);
}

#[tokio::test]
async fn init_surfaces_bootstrap_failure() {
    let harness = Harness::new();
    harness.factory.fail_with("dispatcher refused");
    let mut controller = offline_controller(&harness);

    let err = controller.init().await.unwrap_err();

    assert!(matches!(err, SessionError::Bootstrap(_)), "got {err:?}");
    assert!(controller.subsystems().is_none());
    assert!(!controller.is_started());
}
