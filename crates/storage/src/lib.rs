// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Persistent storage for sable sessions

mod atomic;
mod credentials;
mod crypto;
mod error;
mod general;
mod pair;
mod settings;

pub use credentials::{load_credentials, remove_credentials};
pub use crypto::{CryptoStore, DeviceKeys, CRYPTO_STORE_FILE};
pub use error::StoreError;
pub use general::{CachedRoom, GeneralStore, GENERAL_STORE_FILE};
pub use pair::{
    clear_store_pair, open_store_pair, ClearScope, StoreHandles, StorePaths, CRYPTO_STORE_DIR,
    GENERAL_STORE_DIR,
};
pub use settings::SettingsStore;
