// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn noop_denies_permission_and_accepts_notifications() {
    let adapter = NoOpNotifyAdapter::new();
    assert!(!adapter.request_permission().await.unwrap());
    assert!(adapter.notify("title", "body").await.is_ok());
}
