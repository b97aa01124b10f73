// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Account-metadata cache.

use std::collections::{BTreeMap, BTreeSet};

use sable_core::{RoomId, UserId};
use sable_storage::GeneralStore;
use serde_json::Value;

use super::RoomIndex;
use crate::error::BootstrapError;

/// Account-data event type mapping users to their direct-message rooms.
pub const DIRECT_EVENT: &str = "m.direct";

/// Account data as of bootstrap, with direct-message rooms resolved
/// against the room index.
#[derive(Debug, Clone, Default)]
pub struct AccountData {
    events: BTreeMap<String, Value>,
    direct: BTreeMap<UserId, Vec<RoomId>>,
    direct_rooms: BTreeSet<RoomId>,
}

impl AccountData {
    /// Load every account-data event and resolve `m.direct`.
    ///
    /// Direct rooms the index does not know are dropped; a malformed
    /// `m.direct` event fails the bootstrap.
    pub fn load(general: &GeneralStore, rooms: &RoomIndex) -> Result<Self, BootstrapError> {
        let events = general.all_account_data();
        let direct = match events.get(DIRECT_EVENT) {
            Some(content) => parse_direct(content, rooms)?,
            None => BTreeMap::new(),
        };
        let direct_rooms = direct.values().flatten().cloned().collect();
        Ok(Self {
            events,
            direct,
            direct_rooms,
        })
    }

    pub fn get(&self, event_type: &str) -> Option<&Value> {
        self.events.get(event_type)
    }

    pub fn is_direct(&self, room_id: &str) -> bool {
        self.direct_rooms.contains(room_id)
    }

    /// Direct-message rooms shared with `user_id`.
    pub fn direct_rooms_with(&self, user_id: &str) -> &[RoomId] {
        self.direct.get(user_id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn direct_room_count(&self) -> usize {
        self.direct_rooms.len()
    }
}

fn parse_direct(
    content: &Value,
    rooms: &RoomIndex,
) -> Result<BTreeMap<UserId, Vec<RoomId>>, BootstrapError> {
    let Some(map) = content.as_object() else {
        return Err(BootstrapError::AccountData(format!(
            "{DIRECT_EVENT} content is not an object"
        )));
    };
    let mut direct = BTreeMap::new();
    for (user, room_ids) in map {
        let Some(room_ids) = room_ids.as_array() else {
            return Err(BootstrapError::AccountData(format!(
                "{DIRECT_EVENT} entry for {user} is not a list"
            )));
        };
        let known: Vec<RoomId> = room_ids
            .iter()
            .filter_map(Value::as_str)
            .filter(|id| rooms.contains(id))
            .map(RoomId::from)
            .collect();
        if !known.is_empty() {
            direct.insert(UserId::new(user.as_str()), known);
        }
    }
    Ok(direct)
}

#[cfg(test)]
#[path = "account_data_tests.rs"]
mod tests;
