// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop notification adapter using notify-rust.
//!
//! On macOS, `notify-rust` uses `mac-notification-sys`, whose first call
//! looks up a bundle identifier through AppleScript. Without Automation
//! permission that lookup blocks forever, so the identifier is pre-set at
//! construction time.

use super::{NotifyAdapter, NotifyError};
use async_trait::async_trait;

/// Application name shown as the notification source.
const APP_NAME: &str = "sable";

#[derive(Clone, Copy, Debug, Default)]
pub struct DesktopNotifyAdapter;

impl DesktopNotifyAdapter {
    pub fn new() -> Self {
        #[cfg(target_os = "macos")]
        {
            let _ = mac_notification_sys::set_application("com.apple.Terminal");
        }
        Self
    }
}

#[async_trait]
impl NotifyAdapter for DesktopNotifyAdapter {
    async fn request_permission(&self) -> Result<bool, NotifyError> {
        // Freedesktop and macOS servers grant per application at display
        // time; there is nothing to request up front.
        tracing::debug!("desktop notifications need no explicit grant");
        Ok(true)
    }

    async fn notify(&self, title: &str, message: &str) -> Result<(), NotifyError> {
        let title = title.to_string();
        let message = message.to_string();
        // Notification::show() is synchronous on some platforms; run it on
        // the blocking pool and do not wait for the result.
        tokio::task::spawn_blocking(move || {
            tracing::info!(%title, "sending desktop notification");
            match notify_rust::Notification::new()
                .appname(APP_NAME)
                .summary(&title)
                .body(&message)
                .show()
            {
                Ok(_) => tracing::debug!(%title, "desktop notification sent"),
                Err(e) => tracing::warn!(%title, error = %e, "desktop notification failed"),
            }
        });
        Ok(())
    }
}
