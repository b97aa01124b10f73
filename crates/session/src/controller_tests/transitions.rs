// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use yare::parameterized;

const RECONNECT_CYCLE: [SyncState; 5] = [
    SyncState::Syncing,
    SyncState::Prepared,
    SyncState::Reconnecting,
    SyncState::CatchingUp,
    SyncState::Prepared,
];

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(f)
}

#[test]
fn each_rearm_is_logged_once() {
    let harness = Harness::new();
    let logs = CapturedLogs::default();

    logs.capture(|| {
        block_on(async {
            let mut controller = harness.controller();
            controller.start().await.unwrap();
            harness.engine().emit_sequence(&RECONNECT_CYCLE);
            controller.process_pending().await.unwrap();
        })
    });

    assert_eq!(harness.notifier.permission_requests(), 2);
    assert_eq!(
        logs.contents()
            .matches("notification permissions re-armed")
            .count(),
        2
    );
}

#[tokio::test]
async fn reconnect_does_not_rebuild_subsystems() {
    let harness = Harness::new();
    let mut controller = harness.controller();
    let mut init = controller.bus().subscribe(Topic::InitLoadingFinished);
    controller.start().await.unwrap();

    harness.engine().emit_sequence(&RECONNECT_CYCLE);
    controller.process_pending().await.unwrap();

    assert_eq!(harness.factory.attempts(), 1);
    assert_eq!(harness.factory.builds(), 1);
    assert_eq!(
        count_events(&mut init, &LifecycleEvent::InitLoadingFinished),
        1
    );
    assert!(controller.subsystems().is_some());
    assert_eq!(controller.state().current(), SyncState::Prepared);
    assert_eq!(controller.state().previous(), Some(SyncState::CatchingUp));
}

#[parameterized(
    both = { true, true, 2 },
    first_only = { true, false, 1 },
    reconnect_only = { false, true, 1 },
    neither = { false, false, 0 },
)]
fn rearm_switches_are_independent(first: bool, reconnect: bool, expected: usize) {
    let harness = Harness::with_options(ControllerOptions {
        rearm_on_first_prepared: first,
        rearm_on_reconnect: reconnect,
        ..ControllerOptions::default()
    });

    block_on(async {
        let mut controller = harness.controller();
        controller.start().await.unwrap();
        harness.engine().emit_sequence(&RECONNECT_CYCLE);
        controller.process_pending().await.unwrap();

        let dispatcher = &controller.subsystems().unwrap().notifications;
        assert_eq!(dispatcher.rearm_count(), expected);
    });
    assert_eq!(harness.notifier.permission_requests(), expected);
}

#[tokio::test]
async fn init_finished_follows_the_prepared_report() {
    let harness = Harness::new();
    let mut controller = harness.controller();
    let mut all = controller.bus().subscribe(Topic::All);
    controller.start().await.unwrap();

    harness
        .engine()
        .emit_sequence(&[SyncState::Syncing, SyncState::Prepared]);
    controller.process_pending().await.unwrap();

    assert_eq!(
        all.drain(),
        vec![
            LifecycleEvent::SyncStateChanged {
                current: SyncState::Syncing,
                previous: Some(SyncState::Null),
            },
            LifecycleEvent::SyncStateChanged {
                current: SyncState::Prepared,
                previous: Some(SyncState::Syncing),
            },
            LifecycleEvent::InitLoadingFinished,
        ]
    );
}

#[tokio::test]
async fn first_prepared_without_reported_previous_bootstraps() {
    let harness = Harness::new();
    let mut controller = harness.controller();
    controller.start().await.unwrap();

    harness.engine().emit(SyncState::Prepared, None);
    controller.process_pending().await.unwrap();

    assert_eq!(harness.factory.builds(), 1);
    assert_eq!(controller.state().previous(), Some(SyncState::Null));
    assert!(controller.state().is_initialized());
}

#[tokio::test]
async fn error_state_is_observed_only() {
    let harness = Harness::new();
    let mut controller = harness.prepared().await;

    harness
        .engine()
        .emit_sequence(&[SyncState::Error, SyncState::Prepared]);
    controller.process_pending().await.unwrap();

    assert!(controller.is_started());
    assert!(controller.subsystems().is_some());
    assert_eq!(harness.engine().stop_count(), 0);
    assert_eq!(harness.factory.builds(), 1);
    assert_eq!(harness.notifier.permission_requests(), 2);
}

#[tokio::test]
async fn dispatcher_resolves_rooms_from_the_store() {
    let harness = Harness::new();
    harness.seed();
    let controller = harness.prepared().await;

    let subsystems = controller.subsystems().unwrap();
    subsystems
        .notifications
        .notify_message("!a:hs", "@bob:hs", "ping")
        .await
        .unwrap();

    assert_eq!(harness.notifier.calls()[0].title, "General");
    assert!(subsystems.outbound.enqueue("!a:hs", "pong").is_ok());
}

#[tokio::test]
async fn bootstrap_failure_makes_session_unusable() {
    let harness = Harness::new();
    harness.factory.fail_with("dispatcher refused");
    let mut controller = harness.controller();
    let mut init = controller.bus().subscribe(Topic::InitLoadingFinished);
    controller.start().await.unwrap();

    harness
        .engine()
        .emit_sequence(&[SyncState::Syncing, SyncState::Prepared]);
    let err = controller.process_pending().await.unwrap_err();

    assert!(matches!(err, SessionError::Bootstrap(_)), "got {err:?}");
    assert_eq!(init.try_recv(), None);
    assert!(controller.subsystems().is_none());
    assert!(!controller.is_started());
    assert_eq!(harness.engine().stop_count(), 1);
    assert!(matches!(
        controller.start().await,
        Err(SessionError::Unusable)
    ));
}

#[tokio::test]
async fn signals_without_live_engine_are_ignored() {
    let harness = Harness::new();
    let mut controller = harness.controller();

    controller
        .handle_signal(SyncSignal::StateChanged {
            current: SyncState::Prepared,
            previous: None,
        })
        .await
        .unwrap();

    assert_eq!(controller.state(), SessionState::new());
    assert_eq!(harness.factory.attempts(), 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn init_finished_fires_at_most_once(
        states in proptest::collection::vec(proptest::sample::select(SyncState::ALL.to_vec()), 0..24)
    ) {
        let harness = Harness::new();
        let (init_events, sync_events, builds) = block_on(async {
            let mut controller = harness.controller();
            let mut init = controller.bus().subscribe(Topic::InitLoadingFinished);
            let mut sync = controller.bus().subscribe(Topic::SyncState);
            controller.start().await.unwrap();
            for state in &states {
                harness.engine().emit(*state, None);
            }
            controller.process_pending().await.unwrap();
            (init.drain().len(), sync.drain().len(), harness.factory.builds())
        });

        let expected = usize::from(states.contains(&SyncState::Prepared));
        prop_assert_eq!(init_events, expected);
        prop_assert_eq!(builds, expected);
        prop_assert_eq!(sync_events, states.len());
    }
}
