// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn new_store_is_empty() {
    let dir = tempdir().unwrap();
    let store = GeneralStore::open(&dir.path().join("web-sync-store")).unwrap();
    assert!(store.is_empty());
    assert!(store.rooms().is_empty());
}

#[test]
fn mutations_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("web-sync-store");

    let store = GeneralStore::open(&path).unwrap();
    store
        .put_room(CachedRoom::new("!a:hs").with_name("General"))
        .unwrap();
    store
        .set_account_data("m.direct", json!({"@bob:hs": ["!a:hs"]}))
        .unwrap();
    drop(store);

    let reopened = GeneralStore::open(&path).unwrap();
    assert_eq!(
        reopened.room("!a:hs").and_then(|r| r.name),
        Some("General".to_string())
    );
    assert_eq!(
        reopened.account_data("m.direct"),
        Some(json!({"@bob:hs": ["!a:hs"]}))
    );
}

#[test]
fn all_account_data_lists_every_type() {
    let dir = tempdir().unwrap();
    let store = GeneralStore::open(dir.path()).unwrap();
    store.set_account_data("m.direct", json!({})).unwrap();
    store
        .set_account_data("in.cinny.spaces", json!({"shortcut": []}))
        .unwrap();

    let all = store.all_account_data();
    assert_eq!(
        all.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["in.cinny.spaces", "m.direct"]
    );
}

#[test]
fn clones_share_the_document() {
    let dir = tempdir().unwrap();
    let store = GeneralStore::open(dir.path()).unwrap();
    let other = store.clone();
    other.put_room(CachedRoom::new("!b:hs")).unwrap();
    assert_eq!(store.rooms().len(), 1);
}

#[test]
fn document_is_zstd_compressed() {
    let dir = tempdir().unwrap();
    let store = GeneralStore::open(dir.path()).unwrap();
    store.put_room(CachedRoom::new("!c:hs")).unwrap();

    let bytes = std::fs::read(dir.path().join(GENERAL_STORE_FILE)).unwrap();
    let json = zstd::decode_all(bytes.as_slice()).unwrap();
    let value: Value = serde_json::from_slice(&json).unwrap();
    assert!(value["rooms"]["!c:hs"].is_object());
}

#[test]
fn corrupt_document_fails_to_open() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(GENERAL_STORE_FILE), b"not zstd at all").unwrap();

    match GeneralStore::open(dir.path()) {
        Err(StoreError::Corrupt { path, .. }) => {
            assert_eq!(path, dir.path().join(GENERAL_STORE_FILE));
        }
        other => panic!("expected Corrupt, got {other:?}"),
    }
}

#[test]
fn unavailable_location_fails_to_open() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"a file, not a directory").unwrap();

    let result = GeneralStore::open(&blocker.join("store"));
    assert!(matches!(result, Err(StoreError::Io(_))), "{result:?}");
}

#[test]
fn delete_all_data_empties_memory_and_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("web-sync-store");
    let store = GeneralStore::open(&path).unwrap();
    store.put_room(CachedRoom::new("!a:hs")).unwrap();

    store.delete_all_data().unwrap();

    assert!(store.is_empty());
    assert!(!path.exists());
    assert!(GeneralStore::open(&path).unwrap().is_empty());
}
