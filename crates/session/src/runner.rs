// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Serial runner for the session controller.
//!
//! One task owns the controller and handles engine notifications and
//! handle commands one at a time, so a teardown can never interleave with
//! an in-flight bootstrap.

use sable_adapters::{NotifyAdapter, Reloader, SyncConnector};
use sable_core::{SessionState, Topic};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::controller::SessionController;
use crate::error::SessionError;
use crate::event_bus::{EventBus, Subscription};
use crate::subsystems::SubsystemFactory;

const COMMAND_BUFFER: usize = 16;

type Reply<T> = oneshot::Sender<Result<T, SessionError>>;

enum Command {
    Init(Reply<()>),
    Logout(Reply<()>),
    ClearCache(Reply<()>),
    State(oneshot::Sender<SessionState>),
}

/// Cloneable handle to a running session.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    bus: EventBus,
}

pub struct SessionRunner;

impl SessionRunner {
    /// Move `controller` onto its own task.
    ///
    /// The task ends after a teardown, or once every handle is dropped
    /// (the engine is then stopped and the stores kept).
    pub fn spawn<C, N, R, F>(controller: SessionController<C, N, R, F>) -> (SessionHandle, JoinHandle<()>)
    where
        C: SyncConnector,
        N: NotifyAdapter,
        R: Reloader,
        F: SubsystemFactory,
    {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        let handle = SessionHandle {
            commands: tx,
            bus: controller.bus().clone(),
        };
        let task = tokio::spawn(run(controller, rx));
        (handle, task)
    }
}

async fn run<C, N, R, F>(
    mut controller: SessionController<C, N, R, F>,
    mut commands: mpsc::Receiver<Command>,
) where
    C: SyncConnector,
    N: NotifyAdapter,
    R: Reloader,
    F: SubsystemFactory,
{
    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    info!("all session handles dropped");
                    controller.shutdown();
                    break;
                };
                if handle_command(&mut controller, command).await {
                    break;
                }
            }

            Some(signal) = controller.next_signal() => {
                if let Err(e) = controller.handle_signal(signal).await {
                    error!(error = %e, "failed to handle sync signal");
                }
                if controller.is_terminated() {
                    break;
                }
            }
        }
    }
    debug!("session runner exited");
}

/// Returns true when the command ended the session.
async fn handle_command<C, N, R, F>(
    controller: &mut SessionController<C, N, R, F>,
    command: Command,
) -> bool
where
    C: SyncConnector,
    N: NotifyAdapter,
    R: Reloader,
    F: SubsystemFactory,
{
    match command {
        Command::Init(reply) => {
            let _ = reply.send(controller.init().await);
            false
        }
        Command::Logout(reply) => {
            let _ = reply.send(controller.logout().await);
            true
        }
        Command::ClearCache(reply) => {
            let _ = reply.send(controller.clear_cache_and_reload());
            true
        }
        Command::State(reply) => {
            let _ = reply.send(controller.state());
            false
        }
    }
}

impl SessionHandle {
    pub async fn init(&self) -> Result<(), SessionError> {
        self.request(Command::Init).await?
    }

    pub async fn logout(&self) -> Result<(), SessionError> {
        self.request(Command::Logout).await?
    }

    pub async fn clear_cache_and_reload(&self) -> Result<(), SessionError> {
        self.request(Command::ClearCache).await?
    }

    pub async fn state(&self) -> Result<SessionState, SessionError> {
        self.request(Command::State).await
    }

    /// Register a listener on the session's event bus.
    pub fn subscribe(&self, topic: Topic) -> Subscription {
        self.bus.subscribe(topic)
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, SessionError> {
        let (tx, rx) = oneshot::channel();
        self.commands
            .send(make(tx))
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
