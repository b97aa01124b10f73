// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client-side cached settings.
//!
//! Missing keys fall back to their defaults so settings written by older
//! clients keep loading.

use serde::{Deserialize, Serialize};

/// Theme names, indexed by [`Settings::theme_index`]. Index 0 is the light default.
pub const THEMES: [&str; 5] = ["", "silver-theme", "dark-theme", "butter-theme", "ayu-theme"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub theme_index: usize,
    pub use_system_theme: bool,
    pub is_markdown: bool,
    pub is_people_drawer: bool,
    pub hide_membership_events: bool,
    pub hide_nick_avatar_events: bool,
    #[serde(rename = "sendMessageOnEnter")]
    pub send_on_enter: bool,
    pub only_animate_on_hover: bool,
    pub show_notifications: bool,
    pub is_notification_sounds: bool,
    pub show_room_list_avatar: bool,
    pub show_youtube_embed_player: bool,
    pub show_url_preview: bool,
    pub send_read_receipts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme_index: 0,
            use_system_theme: true,
            is_markdown: true,
            is_people_drawer: true,
            hide_membership_events: false,
            hide_nick_avatar_events: true,
            send_on_enter: true,
            only_animate_on_hover: true,
            show_notifications: true,
            is_notification_sounds: true,
            show_room_list_avatar: false,
            show_youtube_embed_player: false,
            show_url_preview: false,
            send_read_receipts: true,
        }
    }
}

impl Settings {
    /// Name of the selected theme, or `None` when following the system theme
    /// or when the stored index is out of range.
    pub fn theme_name(&self) -> Option<&'static str> {
        if self.use_system_theme {
            return None;
        }
        THEMES.get(self.theme_index).copied()
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
