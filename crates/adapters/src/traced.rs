// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::sync::{SyncConfig, SyncConnector, SyncEngine, SyncEngineError, SyncSignal};
use async_trait::async_trait;
use sable_core::Credentials;
use sable_storage::{DeviceKeys, StoreHandles};
use tokio::sync::mpsc;
use tracing::Instrument;

/// Wrapper that adds tracing to any SyncConnector
#[derive(Clone)]
pub struct TracedConnector<C> {
    inner: C,
}

impl<C> TracedConnector<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<C: SyncConnector> SyncConnector for TracedConnector<C> {
    type Engine = TracedEngine<C::Engine>;

    async fn connect(
        &self,
        credentials: &Credentials,
        stores: &StoreHandles,
    ) -> Result<Self::Engine, SyncEngineError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.connect(credentials, stores).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(_) => tracing::info!(elapsed_ms, "engine constructed"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "connect failed"),
            }
            result.map(TracedEngine::new)
        }
        .instrument(tracing::info_span!(
            "sync.connect",
            server = %credentials.server_url,
            user = %credentials.user_id,
        ))
        .await
    }
}

/// Wrapper that adds tracing to any SyncEngine
#[derive(Clone)]
pub struct TracedEngine<E> {
    inner: E,
}

impl<E> TracedEngine<E> {
    pub fn new(inner: E) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }
}

#[async_trait]
impl<E: SyncEngine> SyncEngine for TracedEngine<E> {
    async fn init_crypto(&self, keys: &DeviceKeys) -> Result<(), SyncEngineError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.init_crypto(keys).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(()) => tracing::info!(elapsed_ms, "crypto initialized"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "crypto init failed"),
            }
            result
        }
        .instrument(tracing::info_span!("sync.init_crypto", device = %keys.device_id))
        .await
    }

    fn subscribe(&self) -> mpsc::UnboundedReceiver<SyncSignal> {
        tracing::debug!("sync subscriber registered");
        self.inner.subscribe()
    }

    async fn start(&self, config: &SyncConfig) -> Result<(), SyncEngineError> {
        async {
            tracing::info!(
                lazy_load_members = config.lazy_load_members,
                error_on_unknown_devices = config.error_on_unknown_devices,
                "starting"
            );
            let result = self.inner.start(config).await;
            if let Err(e) = &result {
                tracing::error!(error = %e, "start failed");
            }
            result
        }
        .instrument(tracing::info_span!("sync.start"))
        .await
    }

    fn stop(&self) {
        tracing::info_span!("sync.stop").in_scope(|| tracing::info!("stopping"));
        self.inner.stop();
    }

    async fn logout(&self) -> Result<(), SyncEngineError> {
        let result = self.inner.logout().await;
        tracing::info_span!("sync.logout").in_scope(|| match &result {
            Ok(()) => tracing::info!("remote logout acknowledged"),
            Err(e) => tracing::warn!(error = %e, "remote logout failed (may be expected)"),
        });
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
