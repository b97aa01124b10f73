// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outbound-action queue.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;
use sable_core::{IdGen, RoomId, UuidIdGen};
use thiserror::Error;

use super::RoomIndex;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutboundError {
    #[error("unknown room: {0}")]
    UnknownRoom(RoomId),
}

/// An action waiting for the server to acknowledge it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundAction {
    /// Client-generated transaction id; the server deduplicates on it
    pub txn_id: String,
    pub room_id: RoomId,
    pub body: String,
}

/// Pending outbound actions, bound to the live sync engine.
pub struct OutboundQueue<E, G = UuidIdGen> {
    engine: Arc<E>,
    rooms: RoomIndex,
    ids: G,
    pending: Mutex<VecDeque<OutboundAction>>,
}

impl<E> OutboundQueue<E> {
    pub fn new(engine: Arc<E>, rooms: RoomIndex) -> Self {
        Self::with_id_gen(engine, rooms, UuidIdGen)
    }
}

impl<E, G: IdGen> OutboundQueue<E, G> {
    pub fn with_id_gen(engine: Arc<E>, rooms: RoomIndex, ids: G) -> Self {
        Self {
            engine,
            rooms,
            ids,
            pending: Mutex::new(VecDeque::new()),
        }
    }

    /// Queue a message for `room_id` and return its transaction id.
    pub fn enqueue(&self, room_id: &str, body: impl Into<String>) -> Result<String, OutboundError> {
        if !self.rooms.contains(room_id) {
            return Err(OutboundError::UnknownRoom(RoomId::new(room_id)));
        }
        let txn_id = self.ids.next();
        self.pending.lock().push_back(OutboundAction {
            txn_id: txn_id.clone(),
            room_id: RoomId::new(room_id),
            body: body.into(),
        });
        tracing::debug!(room = room_id, txn = %txn_id, "queued outbound action");
        Ok(txn_id)
    }

    /// Remove the action the server acknowledged.
    pub fn acknowledge(&self, txn_id: &str) -> Option<OutboundAction> {
        let mut pending = self.pending.lock();
        let pos = pending.iter().position(|a| a.txn_id == txn_id)?;
        pending.remove(pos)
    }

    /// Pending actions, oldest first.
    pub fn pending(&self) -> Vec<OutboundAction> {
        self.pending.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// The engine this queue sends through.
    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }
}

#[cfg(test)]
#[path = "outbound_tests.rs"]
mod tests;
