// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification dispatcher.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use sable_adapters::{NotifyAdapter, NotifyError};
use sable_core::Settings;

use super::RoomIndex;

/// Turns incoming messages into user-visible notifications.
///
/// Notifications are shown only while the user has them enabled in the
/// settings and the platform grant, refreshed by [`rearm`](Self::rearm),
/// is held.
pub struct NotificationDispatcher<N> {
    notifier: N,
    rooms: RoomIndex,
    enabled: bool,
    sounds: bool,
    granted: AtomicBool,
    rearms: AtomicUsize,
}

impl<N: NotifyAdapter> NotificationDispatcher<N> {
    pub fn new(notifier: N, rooms: RoomIndex, settings: &Settings) -> Self {
        Self {
            notifier,
            rooms,
            enabled: settings.show_notifications,
            sounds: settings.is_notification_sounds,
            granted: AtomicBool::new(false),
            rearms: AtomicUsize::new(0),
        }
    }

    /// Re-request the platform grant. Returns whether it is held.
    pub async fn rearm(&self) -> bool {
        self.rearms.fetch_add(1, Ordering::SeqCst);
        let granted = match self.notifier.request_permission().await {
            Ok(granted) => granted,
            Err(e) => {
                tracing::warn!(error = %e, "notification permission request failed");
                false
            }
        };
        self.granted.store(granted, Ordering::SeqCst);
        tracing::info!(granted, "notification permissions re-armed");
        granted
    }

    pub fn is_granted(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    /// Whether notifications would currently be shown.
    pub fn is_active(&self) -> bool {
        self.enabled && self.is_granted()
    }

    pub fn plays_sounds(&self) -> bool {
        self.is_active() && self.sounds
    }

    pub fn rearm_count(&self) -> usize {
        self.rearms.load(Ordering::SeqCst)
    }

    /// Notify about a message from `sender` in `room_id`.
    ///
    /// Returns `Ok(false)` when notifications are inactive.
    pub async fn notify_message(
        &self,
        room_id: &str,
        sender: &str,
        body: &str,
    ) -> Result<bool, NotifyError> {
        if !self.is_active() {
            return Ok(false);
        }
        let room = self.rooms.display_name(room_id).unwrap_or(room_id);
        self.notifier
            .notify(room, &format!("{sender}: {body}"))
            .await?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "notifications_tests.rs"]
mod tests;
