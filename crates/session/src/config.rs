// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session configuration

use std::path::PathBuf;

use sable_adapters::SyncConfig;
use sable_storage::StorePaths;

use crate::env::state_dir;
use crate::error::ConfigError;

/// Paths and options for one session.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root state directory (e.g. ~/.local/state/sable)
    pub state_dir: PathBuf,
    /// Credential file written by the login flow
    pub credentials_path: PathBuf,
    /// Client-side cached settings
    pub settings_path: PathBuf,
    pub log_path: PathBuf,
    /// The persistent store pair
    pub stores: StorePaths,
    pub options: ControllerOptions,
}

impl Config {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::under(state_dir()?))
    }

    /// Standard layout under `state_dir`, with default options.
    pub fn under(state_dir: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self {
            credentials_path: state_dir.join("credentials.json"),
            settings_path: state_dir.join("settings.json"),
            log_path: state_dir.join("sabled.log"),
            stores: StorePaths::under(&state_dir),
            options: ControllerOptions::default(),
            state_dir,
        }
    }
}

/// Behavioral switches for the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Re-arm notification permissions right after the first bootstrap
    pub rearm_on_first_prepared: bool,
    /// Re-arm notification permissions on every later arrival at `Prepared`
    pub rearm_on_reconnect: bool,
    pub sync: SyncConfig,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            rearm_on_first_prepared: true,
            rearm_on_reconnect: true,
            sync: SyncConfig::default(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
