// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;

#[test]
fn room_id_serializes_as_plain_string() {
    let id = RoomId::new("!abc:example.org");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"!abc:example.org\"");
    let back: RoomId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn ids_are_usable_as_str_keys() {
    let mut map = HashMap::new();
    map.insert(RoomId::new("!a:hs"), "General");
    assert_eq!(map.get("!a:hs"), Some(&"General"));
}

#[test]
fn sequential_id_gen_counts_up_across_clones() {
    let ids = SequentialIdGen::new("txn");
    let clone = ids.clone();
    assert_eq!(ids.next(), "txn-1");
    assert_eq!(clone.next(), "txn-2");
    assert_eq!(ids.next(), "txn-3");
}

#[test]
fn uuid_id_gen_produces_distinct_ids() {
    let ids = UuidIdGen;
    assert_ne!(ids.next(), ids.next());
}
