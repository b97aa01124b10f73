// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sable-core: Core types for the sable session client

pub mod credentials;
pub mod event;
pub mod id;
pub mod settings;
pub mod sync_state;

pub use credentials::Credentials;
pub use event::{LifecycleEvent, Topic};
pub use id::{DeviceId, IdGen, RoomId, SequentialIdGen, UserId, UuidIdGen};
pub use settings::Settings;
pub use sync_state::{ParseSyncStateError, SessionState, SyncState, Transition};
