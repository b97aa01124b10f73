// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The credential file written by the login flow.

use crate::atomic::remove_if_exists;
use crate::StoreError;
use sable_core::Credentials;
use std::path::Path;

/// Load credentials from a JSON file.
pub fn load_credentials(path: &Path) -> Result<Credentials, StoreError> {
    let bytes = std::fs::read(path)?;
    let credentials: Credentials = serde_json::from_slice(&bytes)?;
    if !credentials.is_complete() {
        return Err(StoreError::IncompleteCredentials(path.to_path_buf()));
    }
    Ok(credentials)
}

/// Delete the credential file. A missing file is not an error.
pub fn remove_credentials(path: &Path) -> Result<(), StoreError> {
    remove_if_exists(path)?;
    Ok(())
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;
