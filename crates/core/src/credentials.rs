// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session credentials.
//!
//! Credentials are produced by the login flow before a session exists and
//! outlive it. The session controller only ever reads them.

use crate::id::{DeviceId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an authenticated session against a sync server.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Base URL of the homeserver
    pub server_url: String,
    pub access_token: String,
    pub user_id: UserId,
    pub device_id: DeviceId,
}

impl Credentials {
    pub fn new(
        server_url: impl Into<String>,
        access_token: impl Into<String>,
        user_id: impl Into<UserId>,
        device_id: impl Into<DeviceId>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            access_token: access_token.into(),
            user_id: user_id.into(),
            device_id: device_id.into(),
        }
    }

    /// Whether every field carries a value.
    pub fn is_complete(&self) -> bool {
        !self.server_url.is_empty()
            && !self.access_token.is_empty()
            && !self.user_id.as_str().is_empty()
            && !self.device_id.as_str().is_empty()
    }
}

// Access tokens must never reach log files.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("server_url", &self.server_url)
            .field("access_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("device_id", &self.device_id)
            .finish()
    }
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;
