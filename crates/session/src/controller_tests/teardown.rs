// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn logout_destroys_local_session() {
    let harness = Harness::new();
    harness.seed();
    let mut controller = harness.prepared().await;
    let mut teardown = controller.bus().subscribe(Topic::Teardown);

    controller.logout().await.unwrap();

    harness.assert_local_state_destroyed();
    assert!(controller.subsystems().is_none());
    assert!(!controller.is_started());
    assert_eq!(harness.reloader.reload_count(), 1);
    assert_eq!(teardown.try_recv(), Some(LifecycleEvent::LoggedOut));

    let calls = harness.engine().calls();
    let stop = calls.iter().position(|c| *c == EngineCall::Stop).unwrap();
    let logout = calls.iter().position(|c| *c == EngineCall::Logout).unwrap();
    assert!(stop < logout, "engine must stop before remote logout");
}

#[tokio::test]
async fn restarted_process_finds_no_credentials() {
    let harness = Harness::new();
    harness.seed();
    assert!(load_credentials(&harness.config.credentials_path).is_ok());
    let mut controller = harness.prepared().await;

    controller.logout().await.unwrap();

    assert!(!harness.config.credentials_path.exists());
    assert!(matches!(
        load_credentials(&harness.config.credentials_path),
        Err(sable_storage::StoreError::Io(_))
    ));
}

#[tokio::test]
async fn logout_without_start_is_idempotent() {
    let harness = Harness::new();
    harness.seed();
    CryptoStore::open(&harness.config.stores.crypto)
        .unwrap()
        .load_or_generate_keys(&"DEVICE".into())
        .unwrap();
    let mut controller = harness.controller();

    controller.logout().await.unwrap();
    controller.logout().await.unwrap();

    harness.assert_local_state_destroyed();
    assert_eq!(harness.connector.connect_count(), 0);
    assert!(harness.engine().calls().is_empty());
}

#[tokio::test]
async fn remote_logout_failure_still_clears_stores() {
    let harness = Harness::new();
    harness.seed();
    harness.engine().fail_logout("connection reset");
    let mut controller = harness.prepared().await;

    controller.logout().await.unwrap();

    harness.assert_local_state_destroyed();
    assert_eq!(harness.reloader.reload_count(), 1);
}

#[tokio::test]
async fn clear_cache_keeps_key_material() {
    let harness = Harness::new();
    harness.seed();
    let mut controller = harness.prepared().await;
    let keys_before = harness.crypto_bytes_on_disk().unwrap();
    let mut teardown = controller.bus().subscribe(Topic::Teardown);

    controller.clear_cache_and_reload().unwrap();

    assert!(harness.general_on_disk().is_empty());
    assert_eq!(harness.crypto_bytes_on_disk(), Some(keys_before));
    assert!(harness.config.settings_path.exists());
    assert_eq!(
        load_credentials(&harness.config.credentials_path).unwrap(),
        Harness::credentials()
    );
    assert_eq!(teardown.try_recv(), Some(LifecycleEvent::CacheCleared));
    assert_eq!(harness.reloader.reload_count(), 1);
    assert_eq!(harness.engine().stop_count(), 1);
    assert!(!harness.engine().calls().contains(&EngineCall::Logout));
}

#[tokio::test]
async fn invalidation_converges_with_logout() {
    let by_logout = Harness::new();
    by_logout.seed();
    let mut controller = by_logout.prepared().await;
    controller.logout().await.unwrap();

    let by_server = Harness::new();
    by_server.seed();
    let mut controller = by_server.prepared().await;
    let mut teardown = controller.bus().subscribe(Topic::Teardown);
    by_server.engine().invalidate_session();
    controller.process_pending().await.unwrap();

    by_logout.assert_local_state_destroyed();
    by_server.assert_local_state_destroyed();
    assert_eq!(by_server.reloader.reload_count(), 1);
    assert_eq!(by_server.engine().stop_count(), 1);
    assert!(!by_server.engine().calls().contains(&EngineCall::Logout));
    assert_eq!(teardown.try_recv(), Some(LifecycleEvent::SessionInvalidated));
    assert!(controller.is_terminated());
}

#[tokio::test]
async fn teardown_ends_the_session() {
    let harness = Harness::new();
    let mut controller = harness.prepared().await;

    controller.clear_cache_and_reload().unwrap();

    assert!(matches!(
        controller.start().await,
        Err(SessionError::Terminated)
    ));
    assert_eq!(harness.connector.connect_count(), 1);
}

#[tokio::test]
async fn shutdown_keeps_stores() {
    let harness = Harness::new();
    harness.seed();
    let mut controller = harness.prepared().await;

    controller.shutdown();

    assert_eq!(harness.engine().stop_count(), 1);
    assert!(!harness.general_on_disk().is_empty());
    assert!(harness.crypto_bytes_on_disk().is_some());
    assert_eq!(harness.reloader.reload_count(), 0);
}
