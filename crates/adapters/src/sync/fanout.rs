// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delivery of engine signals to every subscriber.

use super::SyncSignal;
use parking_lot::Mutex;
use sable_core::SyncState;
use tokio::sync::mpsc;

/// Subscriber list plus the engine's own view of its state, so every
/// reported transition carries the correct previous state.
#[derive(Debug)]
pub(crate) struct SignalFanout {
    inner: Mutex<FanoutState>,
}

#[derive(Debug)]
struct FanoutState {
    subscribers: Vec<mpsc::UnboundedSender<SyncSignal>>,
    state: SyncState,
}

impl Default for SignalFanout {
    fn default() -> Self {
        Self {
            inner: Mutex::new(FanoutState {
                subscribers: Vec::new(),
                state: SyncState::Null,
            }),
        }
    }
}

impl SignalFanout {
    pub(crate) fn subscribe(&self) -> mpsc::UnboundedReceiver<SyncSignal> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.lock().subscribers.push(tx);
        rx
    }

    pub(crate) fn state(&self) -> SyncState {
        self.inner.lock().state
    }

    /// Move to `next` and report it with the state it replaced.
    pub(crate) fn transition(&self, next: SyncState) {
        let mut inner = self.inner.lock();
        let previous = inner.state;
        inner.state = next;
        let signal = SyncSignal::StateChanged {
            current: next,
            previous: Some(previous),
        };
        inner
            .subscribers
            .retain(|tx| tx.send(signal.clone()).is_ok());
    }

    /// Report a transition verbatim, without consulting the tracked state.
    pub(crate) fn emit(&self, signal: SyncSignal) {
        let mut inner = self.inner.lock();
        if let SyncSignal::StateChanged { current, .. } = signal {
            inner.state = current;
        }
        inner.subscribers.retain(|tx| tx.send(signal.clone()).is_ok());
    }
}
