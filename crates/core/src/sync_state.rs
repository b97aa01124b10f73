// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sync connection state machine.
//!
//! The sync engine reports its connection state as one of seven values.
//! [`SessionState`] records what the controller has observed and maps each
//! reported state onto the single action the controller must take:
//!
//! ```text
//!            ┌──────────────────────── first arrival ───────────► Bootstrap
//! Null ─► Syncing ─► Prepared ─► Reconnecting ─► CatchingUp ─► Prepared ─► Rearm
//!                        │             ▲
//!                        └─► Error ────┘            (any) ─► Stopped
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Connection state reported by the sync engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SyncState {
    /// No sync attempted yet
    Null,
    /// First sync in flight
    Syncing,
    /// Initial sync complete; local state is usable
    Prepared,
    /// Transient connectivity loss, retrying
    Reconnecting,
    /// Reconnected, replaying missed updates
    #[serde(rename = "CATCHUP")]
    CatchingUp,
    /// Unrecoverable per-cycle error; the engine retries on its own
    Error,
    /// Engine explicitly stopped
    Stopped,
}

impl SyncState {
    pub const ALL: [SyncState; 7] = [
        SyncState::Null,
        SyncState::Syncing,
        SyncState::Prepared,
        SyncState::Reconnecting,
        SyncState::CatchingUp,
        SyncState::Error,
        SyncState::Stopped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SyncState::Null => "NULL",
            SyncState::Syncing => "SYNCING",
            SyncState::Prepared => "PREPARED",
            SyncState::Reconnecting => "RECONNECTING",
            SyncState::CatchingUp => "CATCHUP",
            SyncState::Error => "ERROR",
            SyncState::Stopped => "STOPPED",
        }
    }
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sync state: {0}")]
pub struct ParseSyncStateError(pub String);

impl FromStr for SyncState {
    type Err = ParseSyncStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SyncState::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseSyncStateError(s.to_string()))
    }
}

/// What the controller must do in response to an observed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Log only
    Observe,
    /// First arrival at `Prepared`: construct dependent subsystems
    Bootstrap,
    /// Later arrival at `Prepared`: re-arm per-subsystem ready behavior
    Rearm,
}

/// Decide the controller action for `current`, given the previously held
/// state and whether dependent subsystems were already constructed.
pub fn transition(current: SyncState, previous: Option<SyncState>, initialized: bool) -> Transition {
    match (current, previous) {
        (SyncState::Prepared, _) if !initialized => Transition::Bootstrap,
        (SyncState::Prepared, _) => Transition::Rearm,
        (
            SyncState::Null
            | SyncState::Syncing
            | SyncState::Reconnecting
            | SyncState::CatchingUp
            | SyncState::Error
            | SyncState::Stopped,
            _,
        ) => Transition::Observe,
    }
}

/// Sync state as observed by the session controller.
///
/// `previous` is the last distinct state held before `current`; repeated
/// reports of the same state do not shift it. `initialized` flips
/// false→true exactly once, on the first arrival at `Prepared`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    current: SyncState,
    previous: Option<SyncState>,
    initialized: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            current: SyncState::Null,
            previous: None,
            initialized: false,
        }
    }

    pub fn current(&self) -> SyncState {
        self.current
    }

    pub fn previous(&self) -> Option<SyncState> {
        self.previous
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Record a state reported by the sync engine and return the action it
    /// requires. A `Bootstrap` result sets the initialization flag.
    pub fn apply(&mut self, next: SyncState) -> Transition {
        if next != self.current {
            self.previous = Some(self.current);
            self.current = next;
        }
        let action = transition(self.current, self.previous, self.initialized);
        if action == Transition::Bootstrap {
            self.initialized = true;
        }
        action
    }
}

#[cfg(test)]
#[path = "sync_state_tests.rs"]
mod tests;
