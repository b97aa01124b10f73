// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the session's external collaborators

pub mod notify;
pub mod reload;
pub mod sync;
pub mod traced;

pub use notify::{DesktopNotifyAdapter, NoOpNotifyAdapter, NotifyAdapter, NotifyError};
pub use reload::{restart_current_process, Reloader};
pub use sync::{
    OfflineSyncConnector, OfflineSyncEngine, SyncConfig, SyncConnector, SyncEngine,
    SyncEngineError, SyncSignal,
};
pub use traced::{TracedConnector, TracedEngine};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotifyAdapter, NotifyCall};
#[cfg(any(test, feature = "test-support"))]
pub use reload::FakeReloader;
#[cfg(any(test, feature = "test-support"))]
pub use sync::{EngineCall, FakeSyncConnector, FakeSyncEngine};
