// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Room id to display name lookup.

use std::collections::BTreeMap;
use std::sync::Arc;

use sable_core::RoomId;
use sable_storage::GeneralStore;

/// Snapshot of the cached rooms, shared cheaply between subsystems.
#[derive(Debug, Clone, Default)]
pub struct RoomIndex {
    names: Arc<BTreeMap<RoomId, String>>,
}

impl RoomIndex {
    /// Index every room in the general store.
    ///
    /// A room is named by its explicit name, then its canonical alias, then
    /// its id.
    pub fn from_store(general: &GeneralStore) -> Self {
        let names = general
            .rooms()
            .into_iter()
            .map(|room| {
                let name = room
                    .name
                    .filter(|n| !n.is_empty())
                    .or(room.canonical_alias)
                    .unwrap_or_else(|| room.room_id.to_string());
                (room.room_id, name)
            })
            .collect();
        Self {
            names: Arc::new(names),
        }
    }

    pub fn display_name(&self, room_id: &str) -> Option<&str> {
        self.names.get(room_id).map(String::as_str)
    }

    pub fn contains(&self, room_id: &str) -> bool {
        self.names.contains_key(room_id)
    }

    pub fn room_ids(&self) -> impl Iterator<Item = &RoomId> {
        self.names.keys()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
#[path = "room_index_tests.rs"]
mod tests;
