// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependent subsystems constructed once the first sync completes.
//!
//! Construction order is fixed: room index, account data, outbound queue,
//! notification dispatcher. Later subsystems read from earlier ones while
//! they are built.

mod account_data;
mod notifications;
mod outbound;
mod room_index;

pub use account_data::{AccountData, DIRECT_EVENT};
pub use notifications::NotificationDispatcher;
pub use outbound::{OutboundAction, OutboundError, OutboundQueue};
pub use room_index::RoomIndex;

use std::sync::Arc;

use sable_adapters::{NotifyAdapter, SyncEngine};
use sable_core::Settings;
use sable_storage::GeneralStore;

use crate::error::BootstrapError;
use crate::event_bus::EventBus;

/// Everything the controller lends to subsystems during construction.
pub struct BootstrapContext<'a, E, N> {
    /// The live, started sync engine
    pub engine: &'a Arc<E>,
    pub general: &'a GeneralStore,
    pub notifier: &'a N,
    pub settings: &'a Settings,
    pub bus: &'a EventBus,
}

/// The live set of dependent subsystems, owned by the controller.
pub struct Subsystems<E, N> {
    pub room_index: RoomIndex,
    pub account_data: AccountData,
    pub outbound: OutboundQueue<E>,
    pub notifications: NotificationDispatcher<N>,
}

/// Constructs each dependent subsystem.
///
/// Every step has a default; implementations override individual steps to
/// observe construction or inject failures. The order is owned by
/// [`bootstrap`], not by the factory.
pub trait SubsystemFactory: Send + Sync + 'static {
    fn room_index<E, N>(
        &self,
        ctx: &BootstrapContext<'_, E, N>,
    ) -> Result<RoomIndex, BootstrapError> {
        Ok(RoomIndex::from_store(ctx.general))
    }

    fn account_data<E, N>(
        &self,
        ctx: &BootstrapContext<'_, E, N>,
        rooms: &RoomIndex,
    ) -> Result<AccountData, BootstrapError> {
        AccountData::load(ctx.general, rooms)
    }

    fn outbound_queue<E: SyncEngine, N>(
        &self,
        ctx: &BootstrapContext<'_, E, N>,
        rooms: &RoomIndex,
    ) -> Result<OutboundQueue<E>, BootstrapError> {
        Ok(OutboundQueue::new(Arc::clone(ctx.engine), rooms.clone()))
    }

    fn notification_dispatcher<E, N: NotifyAdapter>(
        &self,
        ctx: &BootstrapContext<'_, E, N>,
        rooms: &RoomIndex,
    ) -> Result<NotificationDispatcher<N>, BootstrapError> {
        Ok(NotificationDispatcher::new(
            ctx.notifier.clone(),
            rooms.clone(),
            ctx.settings,
        ))
    }
}

/// Production factory: every step uses its default.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultSubsystems;

impl SubsystemFactory for DefaultSubsystems {}

/// Build every subsystem in order. On failure the already-built ones are
/// dropped before returning, so no partial set survives.
pub fn bootstrap<F, E, N>(
    factory: &F,
    ctx: &BootstrapContext<'_, E, N>,
) -> Result<Subsystems<E, N>, BootstrapError>
where
    F: SubsystemFactory,
    E: SyncEngine,
    N: NotifyAdapter,
{
    let room_index = factory.room_index(ctx)?;
    let account_data = factory.account_data(ctx, &room_index)?;
    let outbound = factory.outbound_queue(ctx, &room_index)?;
    let notifications = factory.notification_dispatcher(ctx, &room_index)?;
    tracing::info!(
        rooms = room_index.len(),
        direct_rooms = account_data.direct_room_count(),
        "subsystems constructed"
    );
    Ok(Subsystems {
        room_index,
        account_data,
        outbound,
        notifications,
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
