// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store for end-to-end encryption key material.
//!
//! Key material is identity: it survives cache clearing and is destroyed
//! only by logout or session invalidation.

use crate::atomic::{remove_dir_if_exists, write_atomic};
use crate::StoreError;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::Rng;
use sable_core::DeviceId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// File name of the key document inside the store directory.
pub const CRYPTO_STORE_FILE: &str = "keys.json";

const KEY_LEN: usize = 32;

/// Long-lived device keys.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceKeys {
    pub device_id: DeviceId,
    pub identity_key: Vec<u8>,
    pub signing_key: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for DeviceKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceKeys")
            .field("device_id", &self.device_id)
            .field("identity_key", &"<redacted>")
            .field("signing_key", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl DeviceKeys {
    fn generate(device_id: &DeviceId) -> Self {
        let mut rng = rand::rng();
        let mut identity = [0u8; KEY_LEN];
        let mut signing = [0u8; KEY_LEN];
        rng.fill(&mut identity);
        rng.fill(&mut signing);
        Self {
            device_id: device_id.clone(),
            identity_key: identity.to_vec(),
            signing_key: signing.to_vec(),
            created_at: Utc::now(),
        }
    }

    fn is_well_formed(&self) -> bool {
        self.identity_key.len() == KEY_LEN && self.signing_key.len() == KEY_LEN
    }
}

/// Shared handle to the crypto store.
#[derive(Debug, Clone)]
pub struct CryptoStore {
    dir: PathBuf,
    keys: Arc<Mutex<Option<DeviceKeys>>>,
}

impl CryptoStore {
    /// Open (or create) the store rooted at `dir`.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(CRYPTO_STORE_FILE);
        let keys = if path.exists() {
            let bytes = std::fs::read(&path)?;
            let keys: DeviceKeys =
                serde_json::from_slice(&bytes).map_err(|e| StoreError::corrupt(&path, e))?;
            if !keys.is_well_formed() {
                return Err(StoreError::corrupt(&path, "truncated key material"));
            }
            Some(keys)
        } else {
            None
        };
        Ok(Self {
            dir: dir.to_path_buf(),
            keys: Arc::new(Mutex::new(keys)),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn device_keys(&self) -> Option<DeviceKeys> {
        self.keys.lock().clone()
    }

    /// Return the stored keys for `device_id`, generating and persisting a
    /// fresh set when the store is empty.
    pub fn load_or_generate_keys(&self, device_id: &DeviceId) -> Result<DeviceKeys, StoreError> {
        let mut keys = self.keys.lock();
        if let Some(existing) = keys.as_ref() {
            if existing.device_id != *device_id {
                return Err(StoreError::DeviceMismatch {
                    stored: existing.device_id.to_string(),
                    expected: device_id.to_string(),
                });
            }
            return Ok(existing.clone());
        }

        let generated = DeviceKeys::generate(device_id);
        let json = serde_json::to_vec_pretty(&generated)?;
        write_atomic(&self.dir.join(CRYPTO_STORE_FILE), &json)?;
        info!(device_id = %device_id, "generated device keys");
        *keys = Some(generated.clone());
        Ok(generated)
    }

    /// Raw persisted bytes of the key document, if any.
    pub fn raw_bytes(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match std::fs::read(self.dir.join(CRYPTO_STORE_FILE)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Destroy all key material, in memory and on disk.
    pub fn clear(&self) -> Result<(), StoreError> {
        *self.keys.lock() = None;
        remove_dir_if_exists(&self.dir)?;
        info!(path = %self.dir.display(), "crypto store cleared");
        Ok(())
    }
}

#[cfg(test)]
#[path = "crypto_tests.rs"]
mod tests;
