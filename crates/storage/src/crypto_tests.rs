// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn keys_are_generated_once_and_reloaded() {
    let dir = tempdir().unwrap();
    let device = DeviceId::new("DEVICEA");

    let store = CryptoStore::open(dir.path()).unwrap();
    assert_eq!(store.device_keys(), None);
    let generated = store.load_or_generate_keys(&device).unwrap();
    assert_eq!(generated.identity_key.len(), 32);
    assert_ne!(generated.identity_key, generated.signing_key);

    let again = store.load_or_generate_keys(&device).unwrap();
    assert_eq!(again, generated);

    let reopened = CryptoStore::open(dir.path()).unwrap();
    assert_eq!(reopened.device_keys(), Some(generated));
}

#[test]
fn keys_for_another_device_are_rejected() {
    let dir = tempdir().unwrap();
    let store = CryptoStore::open(dir.path()).unwrap();
    store.load_or_generate_keys(&DeviceId::new("OLD")).unwrap();

    let err = store.load_or_generate_keys(&DeviceId::new("NEW")).unwrap_err();
    assert!(
        matches!(err, StoreError::DeviceMismatch { ref stored, ref expected } if stored == "OLD" && expected == "NEW"),
        "{err}"
    );
}

#[test]
fn truncated_key_material_is_corrupt() {
    let dir = tempdir().unwrap();
    let keys = serde_json::json!({
        "device_id": "DEV",
        "identity_key": [1, 2, 3],
        "signing_key": [4, 5, 6],
        "created_at": "2026-01-01T00:00:00Z",
    });
    std::fs::write(dir.path().join(CRYPTO_STORE_FILE), keys.to_string()).unwrap();

    assert!(matches!(
        CryptoStore::open(dir.path()),
        Err(StoreError::Corrupt { .. })
    ));
}

#[test]
fn raw_bytes_match_disk_and_clear_removes_them() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("crypto-store");
    let store = CryptoStore::open(&path).unwrap();
    assert_eq!(store.raw_bytes().unwrap(), None);

    store.load_or_generate_keys(&DeviceId::new("DEV")).unwrap();
    let bytes = store.raw_bytes().unwrap().unwrap();
    assert_eq!(bytes, std::fs::read(path.join(CRYPTO_STORE_FILE)).unwrap());

    store.clear().unwrap();
    assert_eq!(store.device_keys(), None);
    assert!(!path.exists());
}

#[test]
fn debug_output_redacts_keys() {
    let dir = tempdir().unwrap();
    let store = CryptoStore::open(dir.path()).unwrap();
    let keys = store.load_or_generate_keys(&DeviceId::new("DEV")).unwrap();
    let rendered = format!("{keys:?}");
    assert!(rendered.contains("<redacted>"));
    assert!(!rendered.contains(&format!("{:?}", keys.identity_key)));
}
