// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session error types

use sable_adapters::SyncEngineError;
use sable_storage::StoreError;
use thiserror::Error;

/// Errors surfaced by the session controller.
///
/// Steady-state sync errors never appear here; they are only visible on
/// the sync state stream.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to open stores: {0}")]
    StoreOpen(#[source] StoreError),

    #[error("failed to construct sync engine: {0}")]
    Connect(#[source] SyncEngineError),

    #[error("crypto init failed: {0}")]
    CryptoInit(String),

    #[error("bootstrap failed: {0}")]
    Bootstrap(#[from] BootstrapError),

    #[error("sync engine failed to start: {0}")]
    EngineStart(#[source] SyncEngineError),

    #[error("failed to clear stores: {0}")]
    StoreClear(#[source] StoreError),

    #[error("session is unusable after a failed bootstrap; restart required")]
    Unusable,

    #[error("session was torn down; restart required")]
    Terminated,

    #[error("session runner has exited")]
    Closed,
}

/// A dependent subsystem failed to construct.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("room index: {0}")]
    RoomIndex(String),

    #[error("account data: {0}")]
    AccountData(String),

    #[error("outbound queue: {0}")]
    OutboundQueue(String),

    #[error("notification dispatcher: {0}")]
    Notifications(String),

    #[error("settings: {0}")]
    Settings(#[from] StoreError),
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
