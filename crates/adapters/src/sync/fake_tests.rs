// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn emitted_signals_reach_every_subscriber() {
    let engine = FakeSyncEngine::new();
    let mut a = engine.subscribe();
    let mut b = engine.subscribe();

    engine.emit(SyncState::Prepared, None);
    engine.invalidate_session();

    for rx in [&mut a, &mut b] {
        assert_eq!(
            rx.try_recv().unwrap(),
            SyncSignal::StateChanged {
                current: SyncState::Prepared,
                previous: None
            }
        );
        assert_eq!(rx.try_recv().unwrap(), SyncSignal::SessionInvalidated);
    }
}

#[tokio::test]
async fn emit_sequence_reports_previous_states() {
    let engine = FakeSyncEngine::new();
    let mut rx = engine.subscribe();

    engine.emit_sequence(&[SyncState::Syncing, SyncState::Prepared]);

    assert_eq!(
        rx.try_recv().unwrap(),
        SyncSignal::StateChanged {
            current: SyncState::Syncing,
            previous: Some(SyncState::Null)
        }
    );
    assert_eq!(
        rx.try_recv().unwrap(),
        SyncSignal::StateChanged {
            current: SyncState::Prepared,
            previous: Some(SyncState::Syncing)
        }
    );
}

#[tokio::test]
async fn dropped_subscribers_are_pruned() {
    let engine = FakeSyncEngine::new();
    drop(engine.subscribe());
    let mut live = engine.subscribe();

    engine.emit(SyncState::Syncing, Some(SyncState::Null));
    assert!(live.try_recv().is_ok());
}

#[tokio::test]
async fn injected_failures_are_returned_and_recorded() {
    let engine = FakeSyncEngine::new();
    engine.fail_start("boom");
    engine.fail_logout("offline");

    assert!(matches!(
        engine.start(&SyncConfig::default()).await,
        Err(SyncEngineError::Start(reason)) if reason == "boom"
    ));
    assert!(matches!(
        engine.logout().await,
        Err(SyncEngineError::Remote(_))
    ));
    engine.stop();

    assert_eq!(engine.start_count(), 1);
    assert_eq!(engine.stop_count(), 1);
    assert_eq!(engine.calls().last(), Some(&EngineCall::Stop));
}
