// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sync engine adapters
//!
//! The sync engine performs the streaming exchange with the server and
//! reports connection-state transitions. The session controller only
//! observes it through these traits.

mod fanout;
mod offline;

pub use offline::{OfflineSyncConnector, OfflineSyncEngine};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{EngineCall, FakeSyncConnector, FakeSyncEngine};

use async_trait::async_trait;
use sable_core::{Credentials, SyncState};
use sable_storage::{DeviceKeys, StoreHandles};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from sync engine operations
#[derive(Debug, Error)]
pub enum SyncEngineError {
    #[error("connect failed: {0}")]
    Connect(String),
    #[error("crypto init failed: {0}")]
    Crypto(String),
    #[error("start failed: {0}")]
    Start(String),
    #[error("remote call failed: {0}")]
    Remote(String),
}

/// Notification delivered by the sync engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncSignal {
    /// Connection state transition
    StateChanged {
        current: SyncState,
        previous: Option<SyncState>,
    },
    /// The server revoked the credential
    SessionInvalidated,
}

/// Options for the engine's streaming loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Fetch room members lazily instead of with the initial sync
    pub lazy_load_members: bool,
    pub timeline_support: bool,
    /// Interactive device verification methods to advertise
    pub verification_methods: Vec<String>,
    /// Refuse to encrypt for devices the user has not verified
    pub error_on_unknown_devices: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            lazy_load_members: true,
            timeline_support: true,
            verification_methods: vec!["m.sas.v1".to_string()],
            error_on_unknown_devices: false,
        }
    }
}

/// A live sync engine bound to one session's credentials and stores.
#[async_trait]
pub trait SyncEngine: Send + Sync + 'static {
    /// Load device key material into the engine's crypto layer.
    async fn init_crypto(&self, keys: &DeviceKeys) -> Result<(), SyncEngineError>;

    /// Register for notifications. Every receiver sees every later signal.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<SyncSignal>;

    /// Start the streaming loop.
    async fn start(&self, config: &SyncConfig) -> Result<(), SyncEngineError>;

    /// Stop the streaming loop. Stopping a stopped engine is a no-op.
    fn stop(&self);

    /// Invalidate the access token on the server.
    async fn logout(&self) -> Result<(), SyncEngineError>;
}

/// Constructs sync engines.
#[async_trait]
pub trait SyncConnector: Send + Sync + 'static {
    type Engine: SyncEngine;

    /// Build an engine bound to `credentials` and the opened `stores`.
    async fn connect(
        &self,
        credentials: &Credentials,
        stores: &StoreHandles,
    ) -> Result<Self::Engine, SyncEngineError>;
}
