// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake sync engine for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::fanout::SignalFanout;
use super::{SyncConfig, SyncConnector, SyncEngine, SyncEngineError, SyncSignal};
use async_trait::async_trait;
use parking_lot::Mutex;
use sable_core::{Credentials, SyncState};
use sable_storage::{DeviceKeys, StoreHandles};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Recorded engine call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    InitCrypto { device_id: String },
    Subscribe,
    Start { config: SyncConfig },
    Stop,
    Logout,
}

#[derive(Default)]
struct FakeEngineState {
    calls: Vec<EngineCall>,
    fail_crypto: Option<String>,
    fail_start: Option<String>,
    fail_logout: Option<String>,
}

/// Fake sync engine for testing.
///
/// Clones share state, so a test can keep a handle while the controller
/// owns another and drive notifications through [`FakeSyncEngine::emit`].
#[derive(Clone, Default)]
pub struct FakeSyncEngine {
    inner: Arc<Mutex<FakeEngineState>>,
    fanout: Arc<SignalFanout>,
}

impl FakeSyncEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<EngineCall> {
        self.inner.lock().calls.clone()
    }

    pub fn stop_count(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::Stop))
    }

    pub fn start_count(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::Start { .. }))
    }

    fn count(&self, f: impl Fn(&EngineCall) -> bool) -> usize {
        self.inner.lock().calls.iter().filter(|c| f(c)).count()
    }

    /// Deliver a state transition to every subscriber.
    pub fn emit(&self, current: SyncState, previous: Option<SyncState>) {
        self.fanout.emit(SyncSignal::StateChanged { current, previous });
    }

    /// Deliver a sequence of transitions, each reported with the one before it.
    pub fn emit_sequence(&self, states: &[SyncState]) {
        for state in states {
            self.fanout.transition(*state);
        }
    }

    /// Report that the server revoked the credential.
    pub fn invalidate_session(&self) {
        self.fanout.emit(SyncSignal::SessionInvalidated);
    }

    pub fn fail_crypto(&self, reason: &str) {
        self.inner.lock().fail_crypto = Some(reason.to_string());
    }

    pub fn fail_start(&self, reason: &str) {
        self.inner.lock().fail_start = Some(reason.to_string());
    }

    pub fn fail_logout(&self, reason: &str) {
        self.inner.lock().fail_logout = Some(reason.to_string());
    }
}

#[async_trait]
impl SyncEngine for FakeSyncEngine {
    async fn init_crypto(&self, keys: &DeviceKeys) -> Result<(), SyncEngineError> {
        let mut inner = self.inner.lock();
        inner.calls.push(EngineCall::InitCrypto {
            device_id: keys.device_id.to_string(),
        });
        match &inner.fail_crypto {
            Some(reason) => Err(SyncEngineError::Crypto(reason.clone())),
            None => Ok(()),
        }
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<SyncSignal> {
        self.inner.lock().calls.push(EngineCall::Subscribe);
        self.fanout.subscribe()
    }

    async fn start(&self, config: &SyncConfig) -> Result<(), SyncEngineError> {
        let mut inner = self.inner.lock();
        inner.calls.push(EngineCall::Start {
            config: config.clone(),
        });
        match &inner.fail_start {
            Some(reason) => Err(SyncEngineError::Start(reason.clone())),
            None => Ok(()),
        }
    }

    fn stop(&self) {
        self.inner.lock().calls.push(EngineCall::Stop);
    }

    async fn logout(&self) -> Result<(), SyncEngineError> {
        let mut inner = self.inner.lock();
        inner.calls.push(EngineCall::Logout);
        match &inner.fail_logout {
            Some(reason) => Err(SyncEngineError::Remote(reason.clone())),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
struct FakeConnectorState {
    connects: usize,
    fail_connect: Option<String>,
}

/// Fake connector that always hands out the same [`FakeSyncEngine`].
#[derive(Clone, Default)]
pub struct FakeSyncConnector {
    engine: FakeSyncEngine,
    inner: Arc<Mutex<FakeConnectorState>>,
}

impl FakeSyncConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle to the engine this connector produces
    pub fn engine(&self) -> FakeSyncEngine {
        self.engine.clone()
    }

    /// Number of engines constructed
    pub fn connect_count(&self) -> usize {
        self.inner.lock().connects
    }

    pub fn fail_connect(&self, reason: &str) {
        self.inner.lock().fail_connect = Some(reason.to_string());
    }
}

#[async_trait]
impl SyncConnector for FakeSyncConnector {
    type Engine = FakeSyncEngine;

    async fn connect(
        &self,
        _credentials: &Credentials,
        _stores: &StoreHandles,
    ) -> Result<Self::Engine, SyncEngineError> {
        let mut inner = self.inner.lock();
        if let Some(reason) = &inner.fail_connect {
            return Err(SyncEngineError::Connect(reason.clone()));
        }
        inner.connects += 1;
        Ok(self.engine.clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
