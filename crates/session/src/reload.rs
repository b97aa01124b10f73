// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reload requests routed to the main loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sable_adapters::Reloader;
use tokio::sync::Notify;

/// [`Reloader`] that wakes the binary's main loop instead of restarting
/// from inside the controller, so the runner can shut down first.
#[derive(Clone, Default)]
pub struct ReloadSignal {
    requested: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ReloadSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Wait until a reload has been requested.
    pub async fn requested(&self) {
        while !self.is_requested() {
            self.notify.notified().await;
        }
    }
}

impl Reloader for ReloadSignal {
    fn reload(&self) {
        tracing::info!("reload requested");
        self.requested.store(true, Ordering::SeqCst);
        // notify_one stores a permit when nobody is waiting yet
        self.notify.notify_one();
    }
}

#[cfg(test)]
#[path = "reload_tests.rs"]
mod tests;
