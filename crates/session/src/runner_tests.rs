// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::config::Config;
use crate::controller::ControllerDeps;
use crate::subsystems::DefaultSubsystems;
use sable_adapters::{FakeNotifyAdapter, FakeReloader, FakeSyncConnector};
use sable_core::{Credentials, LifecycleEvent, SyncState};
use std::time::Duration;
use tempfile::{tempdir, TempDir};

const TIMEOUT: Duration = Duration::from_secs(5);

struct Setup {
    _dir: TempDir,
    connector: FakeSyncConnector,
    reloader: FakeReloader,
    handle: SessionHandle,
    task: JoinHandle<()>,
}

fn spawn_session() -> Setup {
    let dir = tempdir().unwrap();
    let config = Config::under(dir.path());
    let connector = FakeSyncConnector::new();
    let reloader = FakeReloader::new();
    let controller = SessionController::new(
        Credentials::new("https://hs.example.org", "token", "@alice:hs", "DEVICE"),
        &config,
        ControllerDeps {
            connector: connector.clone(),
            notifier: FakeNotifyAdapter::new(),
            reloader: reloader.clone(),
            factory: DefaultSubsystems,
        },
    );
    let (handle, task) = SessionRunner::spawn(controller);
    Setup {
        _dir: dir,
        connector,
        reloader,
        handle,
        task,
    }
}

#[tokio::test]
async fn engine_signals_are_handled_on_the_runner() {
    let setup = spawn_session();
    let mut init = setup.handle.subscribe(Topic::InitLoadingFinished);
    setup.handle.init().await.unwrap();

    setup
        .connector
        .engine()
        .emit_sequence(&[SyncState::Syncing, SyncState::Prepared]);

    let event = tokio::time::timeout(TIMEOUT, init.recv()).await.unwrap();
    assert_eq!(event, Some(LifecycleEvent::InitLoadingFinished));
    let state = setup.handle.state().await.unwrap();
    assert_eq!(state.current(), SyncState::Prepared);
    assert!(state.is_initialized());
}

#[tokio::test]
async fn concurrent_init_constructs_one_engine() {
    let setup = spawn_session();
    let other = setup.handle.clone();

    let (a, b) = tokio::join!(setup.handle.init(), other.init());

    a.unwrap();
    b.unwrap();
    assert_eq!(setup.connector.connect_count(), 1);
}

#[tokio::test]
async fn logout_ends_the_runner() {
    let setup = spawn_session();
    setup.handle.init().await.unwrap();

    setup.handle.logout().await.unwrap();

    tokio::time::timeout(TIMEOUT, setup.task).await.unwrap().unwrap();
    assert_eq!(setup.reloader.reload_count(), 1);
    assert!(matches!(
        setup.handle.state().await,
        Err(SessionError::Closed)
    ));
}

#[tokio::test]
async fn invalidation_ends_the_runner() {
    let setup = spawn_session();
    let mut teardown = setup.handle.subscribe(Topic::Teardown);
    setup.handle.init().await.unwrap();

    setup.connector.engine().invalidate_session();

    let event = tokio::time::timeout(TIMEOUT, teardown.recv()).await.unwrap();
    assert_eq!(event, Some(LifecycleEvent::SessionInvalidated));
    tokio::time::timeout(TIMEOUT, setup.task).await.unwrap().unwrap();
    assert_eq!(setup.reloader.reload_count(), 1);
}

#[tokio::test]
async fn dropping_every_handle_stops_the_engine() {
    let setup = spawn_session();
    setup.handle.init().await.unwrap();
    let engine = setup.connector.engine();

    drop(setup.handle);

    tokio::time::timeout(TIMEOUT, setup.task).await.unwrap().unwrap();
    assert_eq!(engine.stop_count(), 1);
    assert_eq!(setup.reloader.reload_count(), 0);
}
