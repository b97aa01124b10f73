// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[tokio::test]
async fn fake_notify_records_calls() {
    let adapter = FakeNotifyAdapter::new();

    adapter.notify("General", "alice: hello").await.unwrap();
    adapter.notify("General", "bob: hi").await.unwrap();

    let calls = adapter.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].title, "General");
    assert_eq!(calls[0].message, "alice: hello");
}

#[tokio::test]
async fn fake_notify_counts_permission_requests() {
    let adapter = FakeNotifyAdapter::new();
    assert!(adapter.request_permission().await.unwrap());

    adapter.set_granted(false);
    assert!(!adapter.request_permission().await.unwrap());
    assert_eq!(adapter.permission_requests(), 2);
}
