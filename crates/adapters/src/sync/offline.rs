// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Offline sync engine.
//!
//! Serves the session from the locally cached projection without talking
//! to a server: starting reports `Syncing` then `Prepared`, stopping
//! reports `Stopped`. Used when no network engine is configured.

use super::fanout::SignalFanout;
use super::{SyncConfig, SyncConnector, SyncEngine, SyncEngineError, SyncSignal};
use async_trait::async_trait;
use parking_lot::Mutex;
use sable_core::{Credentials, DeviceId, SyncState};
use sable_storage::{DeviceKeys, GeneralStore, StoreHandles};
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineSyncConnector;

impl OfflineSyncConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SyncConnector for OfflineSyncConnector {
    type Engine = OfflineSyncEngine;

    async fn connect(
        &self,
        credentials: &Credentials,
        stores: &StoreHandles,
    ) -> Result<Self::Engine, SyncEngineError> {
        Ok(OfflineSyncEngine {
            device_id: credentials.device_id.clone(),
            general: stores.general.clone(),
            crypto_ready: Arc::new(Mutex::new(false)),
            fanout: Arc::new(SignalFanout::default()),
        })
    }
}

#[derive(Clone, Debug)]
pub struct OfflineSyncEngine {
    device_id: DeviceId,
    general: GeneralStore,
    crypto_ready: Arc<Mutex<bool>>,
    fanout: Arc<SignalFanout>,
}

#[async_trait]
impl SyncEngine for OfflineSyncEngine {
    async fn init_crypto(&self, keys: &DeviceKeys) -> Result<(), SyncEngineError> {
        if keys.device_id != self.device_id {
            return Err(SyncEngineError::Crypto(format!(
                "keys belong to {}, session device is {}",
                keys.device_id, self.device_id
            )));
        }
        *self.crypto_ready.lock() = true;
        Ok(())
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<SyncSignal> {
        self.fanout.subscribe()
    }

    async fn start(&self, _config: &SyncConfig) -> Result<(), SyncEngineError> {
        if !*self.crypto_ready.lock() {
            return Err(SyncEngineError::Start("crypto not initialized".to_string()));
        }
        if matches!(self.fanout.state(), SyncState::Syncing | SyncState::Prepared) {
            return Ok(());
        }
        self.fanout.transition(SyncState::Syncing);
        tracing::debug!(
            rooms = self.general.rooms().len(),
            "serving cached projection"
        );
        self.fanout.transition(SyncState::Prepared);
        Ok(())
    }

    fn stop(&self) {
        if self.fanout.state() != SyncState::Stopped {
            self.fanout.transition(SyncState::Stopped);
        }
    }

    async fn logout(&self) -> Result<(), SyncEngineError> {
        Err(SyncEngineError::Remote(
            "offline engine has no server connection".to_string(),
        ))
    }
}

#[cfg(test)]
#[path = "offline_tests.rs"]
mod tests;
