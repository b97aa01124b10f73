// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn empty_document_loads_defaults() {
    let settings: Settings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, Settings::default());
    assert!(settings.show_notifications);
    assert!(!settings.hide_membership_events);
}

#[test]
fn partial_document_overrides_only_given_keys() {
    let settings: Settings =
        serde_json::from_str(r#"{"themeIndex": 2, "useSystemTheme": false, "sendMessageOnEnter": false}"#)
            .unwrap();
    assert_eq!(settings.theme_index, 2);
    assert!(!settings.send_on_enter);
    assert!(settings.is_markdown);
    assert_eq!(settings.theme_name(), Some("dark-theme"));
}

#[yare::parameterized(
    system_theme  = { true, 3, None },
    light_default = { false, 0, Some("") },
    ayu           = { false, 4, Some("ayu-theme") },
    out_of_range  = { false, 9, None },
)]
fn theme_name(use_system: bool, index: usize, expected: Option<&str>) {
    let settings = Settings {
        use_system_theme: use_system,
        theme_index: index,
        ..Settings::default()
    };
    assert_eq!(settings.theme_name(), expected);
}
