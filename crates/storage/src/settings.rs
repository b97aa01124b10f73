// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence for client-side cached settings.

use crate::atomic::{remove_if_exists, rotate_bak_path, write_atomic};
use crate::StoreError;
use sable_core::Settings;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults when absent.
    ///
    /// An unreadable document is moved aside to a `.bak` file so the client
    /// starts with defaults instead of failing.
    pub fn load(&self) -> Result<Settings, StoreError> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }
        let bytes = std::fs::read(&self.path)?;
        match serde_json::from_slice(&bytes) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                let bak_path = rotate_bak_path(&self.path);
                warn!(
                    error = %e,
                    path = %self.path.display(),
                    bak = %bak_path.display(),
                    "corrupt settings, moving to .bak and using defaults",
                );
                std::fs::rename(&self.path, &bak_path)?;
                Ok(Settings::default())
            }
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(settings)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    /// Load, modify and save in one step.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) -> Result<Settings, StoreError> {
        let mut settings = self.load()?;
        f(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        remove_if_exists(&self.path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
