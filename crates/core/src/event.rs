// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle events published on the session event bus.

use crate::sync_state::SyncState;
use serde::{Deserialize, Serialize};

/// Event announced by the session controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// Dependent subsystems are constructed; fired at most once per session
    InitLoadingFinished,
    /// Raw state transition reported by the sync engine
    SyncStateChanged {
        current: SyncState,
        previous: Option<SyncState>,
    },
    /// The server revoked the session credential
    SessionInvalidated,
    /// Local session data was destroyed by an explicit logout
    LoggedOut,
    /// The derived local cache was discarded; identity was kept
    CacheCleared,
}

/// Subscription filter for [`LifecycleEvent`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    InitLoadingFinished,
    SyncState,
    /// Session invalidation, logout and cache clearing
    Teardown,
    /// Every event
    All,
}

impl LifecycleEvent {
    /// Wire name of the event (stable, used in logs).
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::InitLoadingFinished => "init_loading_finished",
            LifecycleEvent::SyncStateChanged { .. } => "sync",
            LifecycleEvent::SessionInvalidated => "session_logged_out",
            LifecycleEvent::LoggedOut => "logged_out",
            LifecycleEvent::CacheCleared => "cache_cleared",
        }
    }

    pub fn topic(&self) -> Topic {
        match self {
            LifecycleEvent::InitLoadingFinished => Topic::InitLoadingFinished,
            LifecycleEvent::SyncStateChanged { .. } => Topic::SyncState,
            LifecycleEvent::SessionInvalidated
            | LifecycleEvent::LoggedOut
            | LifecycleEvent::CacheCleared => Topic::Teardown,
        }
    }
}

impl Topic {
    pub fn matches(&self, event: &LifecycleEvent) -> bool {
        *self == Topic::All || *self == event.topic()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
