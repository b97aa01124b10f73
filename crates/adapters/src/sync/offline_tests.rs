// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sable_storage::{open_store_pair, StorePaths};
use tempfile::tempdir;

async fn engine() -> (OfflineSyncEngine, StoreHandles, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let stores = open_store_pair(&StorePaths::under(dir.path())).unwrap();
    let creds = Credentials::new("https://hs", "tok", "@a:hs", "DEV");
    let engine = OfflineSyncConnector::new()
        .connect(&creds, &stores)
        .await
        .unwrap();
    (engine, stores, dir)
}

fn changed(current: SyncState, previous: SyncState) -> SyncSignal {
    SyncSignal::StateChanged {
        current,
        previous: Some(previous),
    }
}

#[tokio::test]
async fn start_reports_syncing_then_prepared_and_stop_reports_stopped() {
    let (engine, stores, _dir) = engine().await;
    let keys = stores
        .crypto
        .load_or_generate_keys(&DeviceId::new("DEV"))
        .unwrap();
    let mut rx = engine.subscribe();

    engine.init_crypto(&keys).await.unwrap();
    engine.start(&SyncConfig::default()).await.unwrap();
    engine.stop();
    engine.stop();

    assert_eq!(rx.try_recv().unwrap(), changed(SyncState::Syncing, SyncState::Null));
    assert_eq!(rx.try_recv().unwrap(), changed(SyncState::Prepared, SyncState::Syncing));
    assert_eq!(rx.try_recv().unwrap(), changed(SyncState::Stopped, SyncState::Prepared));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn start_requires_crypto() {
    let (engine, _stores, _dir) = engine().await;
    assert!(matches!(
        engine.start(&SyncConfig::default()).await,
        Err(SyncEngineError::Start(_))
    ));
}

#[tokio::test]
async fn crypto_rejects_keys_of_another_device() {
    let (engine, stores, _dir) = engine().await;
    let keys = stores
        .crypto
        .load_or_generate_keys(&DeviceId::new("OTHER"))
        .unwrap();
    assert!(matches!(
        engine.init_crypto(&keys).await,
        Err(SyncEngineError::Crypto(_))
    ));
}

#[tokio::test]
async fn remote_logout_is_unavailable() {
    let (engine, _stores, _dir) = engine().await;
    assert!(matches!(engine.logout().await, Err(SyncEngineError::Remote(_))));
}
