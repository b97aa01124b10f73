// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The persistent store pair: general store plus crypto store.

use crate::atomic::remove_dir_if_exists;
use crate::{CryptoStore, GeneralStore, StoreError};
use std::path::PathBuf;
use tracing::info;

/// Directory name of the general store under the state directory.
pub const GENERAL_STORE_DIR: &str = "web-sync-store";
/// Directory name of the crypto store under the state directory.
pub const CRYPTO_STORE_DIR: &str = "crypto-store";

/// Locations of both stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub general: PathBuf,
    pub crypto: PathBuf,
}

impl StorePaths {
    /// Standard layout under a state directory.
    pub fn under(state_dir: impl Into<PathBuf>) -> Self {
        let state_dir = state_dir.into();
        Self {
            general: state_dir.join(GENERAL_STORE_DIR),
            crypto: state_dir.join(CRYPTO_STORE_DIR),
        }
    }
}

/// Opened handles to both stores.
#[derive(Debug, Clone)]
pub struct StoreHandles {
    pub general: GeneralStore,
    pub crypto: CryptoStore,
}

/// Which stores a clear operation wipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    /// General and crypto store (logout, session invalidation)
    All,
    /// General store only; key material is preserved (cache reload)
    GeneralOnly,
}

/// Open both stores, general store first.
pub fn open_store_pair(paths: &StorePaths) -> Result<StoreHandles, StoreError> {
    let general = GeneralStore::open(&paths.general)?;
    let crypto = CryptoStore::open(&paths.crypto)?;
    Ok(StoreHandles { general, crypto })
}

/// Clear stores on disk without requiring open handles.
///
/// Used when the session never started or its handles were already
/// released. Both stores are attempted even if the first one fails; the
/// first error is returned.
pub fn clear_store_pair(paths: &StorePaths, scope: ClearScope) -> Result<(), StoreError> {
    let general = remove_dir_if_exists(&paths.general);
    let crypto = match scope {
        ClearScope::All => remove_dir_if_exists(&paths.crypto),
        ClearScope::GeneralOnly => Ok(()),
    };
    info!(?scope, "cleared store pair on disk");
    general?;
    crypto?;
    Ok(())
}

impl StoreHandles {
    /// Clear through the open handles so in-memory views are emptied too.
    pub fn clear(&self, scope: ClearScope) -> Result<(), StoreError> {
        let general = self.general.delete_all_data();
        let crypto = match scope {
            ClearScope::All => self.crypto.clear(),
            ClearScope::GeneralOnly => Ok(()),
        };
        general?;
        crypto
    }
}

#[cfg(test)]
#[path = "pair_tests.rs"]
mod tests;
