// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! General-purpose object store.
//!
//! Holds the locally derived projection of the account: cached rooms,
//! account data and the sync position. Everything here can be rebuilt from
//! the server, which is why cache-clearing wipes only this store.
//!
//! The document is kept in memory behind a shared handle and persisted as
//! zstd-compressed JSON after every mutation.

use crate::atomic::{remove_dir_if_exists, write_atomic};
use crate::StoreError;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use sable_core::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// File name of the document inside the store directory.
pub const GENERAL_STORE_FILE: &str = "store.json.zst";

// zstd level 3 is a good balance of speed and compression
const COMPRESSION_LEVEL: i32 = 3;

/// A room as cached from the last sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedRoom {
    pub room_id: RoomId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub canonical_alias: Option<String>,
    #[serde(default)]
    pub member_count: u64,
}

impl CachedRoom {
    pub fn new(room_id: impl Into<RoomId>) -> Self {
        Self {
            room_id: room_id.into(),
            name: None,
            canonical_alias: None,
            member_count: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.canonical_alias = Some(alias.into());
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    rooms: BTreeMap<RoomId, CachedRoom>,
    #[serde(default)]
    account_data: BTreeMap<String, Value>,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
}

impl Document {
    fn is_empty(&self) -> bool {
        self.rooms.is_empty() && self.account_data.is_empty()
    }
}

/// Shared handle to the general store.
///
/// Clones refer to the same document. Only the session controller clears it.
#[derive(Debug, Clone)]
pub struct GeneralStore {
    dir: PathBuf,
    doc: Arc<Mutex<Document>>,
}

impl GeneralStore {
    /// Open (or create) the store rooted at `dir`.
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(GENERAL_STORE_FILE);
        let doc = if path.exists() {
            let file = File::open(&path)?;
            let decoder = zstd::stream::read::Decoder::new(file)
                .map_err(|e| StoreError::corrupt(&path, e))?;
            serde_json::from_reader(decoder).map_err(|e| StoreError::corrupt(&path, e))?
        } else {
            Document::default()
        };
        debug!(
            path = %path.display(),
            rooms = doc.rooms.len(),
            "opened general store"
        );
        Ok(Self {
            dir: dir.to_path_buf(),
            doc: Arc::new(Mutex::new(doc)),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_empty(&self) -> bool {
        self.doc.lock().is_empty()
    }

    pub fn rooms(&self) -> Vec<CachedRoom> {
        self.doc.lock().rooms.values().cloned().collect()
    }

    pub fn room(&self, room_id: &str) -> Option<CachedRoom> {
        self.doc.lock().rooms.get(room_id).cloned()
    }

    pub fn put_room(&self, room: CachedRoom) -> Result<(), StoreError> {
        let mut doc = self.doc.lock();
        doc.rooms.insert(room.room_id.clone(), room);
        self.persist(&mut doc)
    }

    pub fn account_data(&self, event_type: &str) -> Option<Value> {
        self.doc.lock().account_data.get(event_type).cloned()
    }

    /// Every account-data event, keyed by type.
    pub fn all_account_data(&self) -> BTreeMap<String, Value> {
        self.doc.lock().account_data.clone()
    }

    pub fn set_account_data(
        &self,
        event_type: impl Into<String>,
        content: Value,
    ) -> Result<(), StoreError> {
        let mut doc = self.doc.lock();
        doc.account_data.insert(event_type.into(), content);
        self.persist(&mut doc)
    }

    /// Drop every cached entry, in memory and on disk.
    pub fn delete_all_data(&self) -> Result<(), StoreError> {
        let mut doc = self.doc.lock();
        *doc = Document::default();
        remove_dir_if_exists(&self.dir)?;
        info!(path = %self.dir.display(), "general store cleared");
        Ok(())
    }

    fn persist(&self, doc: &mut Document) -> Result<(), StoreError> {
        doc.saved_at = Some(Utc::now());
        let json = serde_json::to_vec(&*doc)?;
        let compressed = zstd::encode_all(json.as_slice(), COMPRESSION_LEVEL)?;
        write_atomic(&self.dir.join(GENERAL_STORE_FILE), &compressed)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "general_tests.rs"]
mod tests;
