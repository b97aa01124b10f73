// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! sable-session: session lifecycle controller and its composition root

pub mod config;
pub mod controller;
mod env;
pub mod error;
pub mod event_bus;
pub mod reload;
pub mod runner;
pub mod subsystems;

pub use config::{Config, ControllerOptions};
pub use controller::{ControllerDeps, SessionController};
pub use error::{BootstrapError, ConfigError, SessionError};
pub use event_bus::{EventBus, Subscription, SubscriptionId};
pub use reload::ReloadSignal;
pub use runner::{SessionHandle, SessionRunner};
pub use subsystems::{
    AccountData, DefaultSubsystems, NotificationDispatcher, OutboundAction, OutboundQueue,
    RoomIndex, SubsystemFactory, Subsystems,
};
