// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the persistent stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store at {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("key material belongs to device {stored}, session device is {expected}")]
    DeviceMismatch { stored: String, expected: String },

    #[error("credentials at {0} are incomplete")]
    IncompleteCredentials(PathBuf),
}

impl StoreError {
    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        StoreError::Corrupt {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
