// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process restart adapters
//!
//! Teardown ends the session's lifetime: instead of restarting the
//! controller in place, the whole process is restarted so no in-memory
//! session state can survive.

mod exec;

pub use exec::restart_current_process;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeReloader;

/// Requests a full process restart.
pub trait Reloader: Clone + Send + Sync + 'static {
    /// Request the restart. Implementations may defer the actual restart
    /// until the caller has returned.
    fn reload(&self);
}
