// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;

#[yare::parameterized(
    null         = { SyncState::Null,         "NULL" },
    syncing      = { SyncState::Syncing,      "SYNCING" },
    prepared     = { SyncState::Prepared,     "PREPARED" },
    reconnecting = { SyncState::Reconnecting, "RECONNECTING" },
    catching_up  = { SyncState::CatchingUp,   "CATCHUP" },
    error        = { SyncState::Error,        "ERROR" },
    stopped      = { SyncState::Stopped,      "STOPPED" },
)]
fn state_names_match_engine_vocabulary(state: SyncState, name: &str) {
    assert_eq!(state.to_string(), name);
    assert_eq!(name.parse::<SyncState>().unwrap(), state);
    assert_eq!(
        serde_json::to_string(&state).unwrap(),
        format!("\"{name}\"")
    );
}

#[test]
fn parse_is_case_insensitive_and_rejects_unknown() {
    assert_eq!("prepared".parse::<SyncState>(), Ok(SyncState::Prepared));
    assert_eq!(
        "CONNECTED".parse::<SyncState>(),
        Err(ParseSyncStateError("CONNECTED".to_string()))
    );
}

#[test]
fn new_session_state_starts_at_null() {
    let state = SessionState::new();
    assert_eq!(state.current(), SyncState::Null);
    assert_eq!(state.previous(), None);
    assert!(!state.is_initialized());
}

#[test]
fn first_prepared_bootstraps_and_later_ones_rearm() {
    let mut state = SessionState::new();
    assert_eq!(state.apply(SyncState::Syncing), Transition::Observe);
    assert_eq!(state.apply(SyncState::Prepared), Transition::Bootstrap);
    assert!(state.is_initialized());
    assert_eq!(state.apply(SyncState::Reconnecting), Transition::Observe);
    assert_eq!(state.apply(SyncState::CatchingUp), Transition::Observe);
    assert_eq!(state.apply(SyncState::Prepared), Transition::Rearm);
    assert_eq!(state.previous(), Some(SyncState::CatchingUp));
}

#[test]
fn previous_tracks_last_distinct_state() {
    let mut state = SessionState::new();
    state.apply(SyncState::Syncing);
    state.apply(SyncState::Syncing);
    assert_eq!(state.current(), SyncState::Syncing);
    assert_eq!(state.previous(), Some(SyncState::Null));

    state.apply(SyncState::Prepared);
    state.apply(SyncState::Prepared);
    assert_eq!(state.previous(), Some(SyncState::Syncing));
}

#[test]
fn first_prepared_after_initial_error_still_bootstraps() {
    let mut state = SessionState::new();
    state.apply(SyncState::Error);
    state.apply(SyncState::Reconnecting);
    assert_eq!(state.apply(SyncState::Prepared), Transition::Bootstrap);
}

#[yare::parameterized(
    null         = { SyncState::Null },
    syncing      = { SyncState::Syncing },
    reconnecting = { SyncState::Reconnecting },
    catching_up  = { SyncState::CatchingUp },
    error        = { SyncState::Error },
    stopped      = { SyncState::Stopped },
)]
fn non_prepared_states_only_observe(state: SyncState) {
    assert_eq!(transition(state, None, false), Transition::Observe);
    assert_eq!(transition(state, Some(SyncState::Prepared), true), Transition::Observe);
}

fn any_state() -> impl Strategy<Value = SyncState> {
    prop::sample::select(SyncState::ALL.to_vec())
}

proptest! {
    #[test]
    fn bootstrap_happens_at_most_once(states in prop::collection::vec(any_state(), 0..64)) {
        let mut session = SessionState::new();
        let actions: Vec<_> = states.iter().map(|s| session.apply(*s)).collect();

        let bootstraps = actions.iter().filter(|a| **a == Transition::Bootstrap).count();
        let saw_prepared = states.contains(&SyncState::Prepared);
        prop_assert_eq!(bootstraps, usize::from(saw_prepared));
        prop_assert_eq!(session.is_initialized(), saw_prepared);

        // Bootstrap is always the action for the first Prepared report
        if let Some(first) = states.iter().position(|s| *s == SyncState::Prepared) {
            prop_assert_eq!(actions[first], Transition::Bootstrap);
            for (state, action) in states.iter().zip(&actions).skip(first + 1) {
                if *state == SyncState::Prepared {
                    prop_assert_eq!(*action, Transition::Rearm);
                }
            }
        }
    }
}
