// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use sable_storage::CachedRoom;
use tempfile::tempdir;
use yare::parameterized;

#[parameterized(
    explicit_name = { Some("General"), Some("#general:hs"), "General" },
    alias_fallback = { None, Some("#general:hs"), "#general:hs" },
    empty_name_uses_alias = { Some(""), Some("#general:hs"), "#general:hs" },
    id_fallback = { None, None, "!r:hs" },
)]
fn display_name_precedence(name: Option<&str>, alias: Option<&str>, expected: &str) {
    let dir = tempdir().unwrap();
    let store = GeneralStore::open(dir.path()).unwrap();
    let mut room = CachedRoom::new("!r:hs");
    room.name = name.map(String::from);
    room.canonical_alias = alias.map(String::from);
    store.put_room(room).unwrap();

    let index = RoomIndex::from_store(&store);

    assert_eq!(index.display_name("!r:hs"), Some(expected));
}

#[test]
fn snapshot_is_not_affected_by_later_writes() {
    let dir = tempdir().unwrap();
    let store = GeneralStore::open(dir.path()).unwrap();
    store.put_room(CachedRoom::new("!a:hs")).unwrap();

    let index = RoomIndex::from_store(&store);
    store.put_room(CachedRoom::new("!b:hs")).unwrap();

    assert_eq!(index.len(), 1);
    assert!(index.contains("!a:hs"));
    assert!(!index.contains("!b:hs"));
}

#[test]
fn empty_store_gives_empty_index() {
    let dir = tempdir().unwrap();
    let store = GeneralStore::open(dir.path()).unwrap();
    assert!(RoomIndex::from_store(&store).is_empty());
}
