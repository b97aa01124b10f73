// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session lifecycle controller: startup, sync state handling, teardown.
//!
//! The controller exclusively owns the store pair, the sync engine and the
//! dependent subsystems. Every entry point takes `&mut self`; callers that
//! share a controller go through [`SessionRunner`](crate::SessionRunner),
//! which serializes sync notifications and teardown requests on one task.

use std::path::PathBuf;
use std::sync::Arc;

use sable_adapters::{NotifyAdapter, Reloader, SyncConnector, SyncEngine, SyncSignal};
use sable_core::{Credentials, LifecycleEvent, SessionState, SyncState, Transition};
use sable_storage::{
    clear_store_pair, open_store_pair, remove_credentials, ClearScope, SettingsStore, StoreError,
    StoreHandles, StorePaths,
};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::{Config, ControllerOptions};
use crate::error::SessionError;
use crate::event_bus::EventBus;
use crate::subsystems::{self, BootstrapContext, DefaultSubsystems, SubsystemFactory, Subsystems};

/// External collaborators handed to the controller at construction.
pub struct ControllerDeps<C, N, R, F = DefaultSubsystems> {
    pub connector: C,
    pub notifier: N,
    pub reloader: R,
    pub factory: F,
}

/// Session lifecycle controller.
pub struct SessionController<C: SyncConnector, N, R, F = DefaultSubsystems> {
    credentials: Credentials,
    credentials_path: PathBuf,
    paths: StorePaths,
    settings: SettingsStore,
    options: ControllerOptions,
    connector: C,
    notifier: N,
    reloader: R,
    factory: F,
    bus: EventBus,
    state: SessionState,
    stores: Option<StoreHandles>,
    engine: Option<Arc<C::Engine>>,
    signals: Option<mpsc::UnboundedReceiver<SyncSignal>>,
    subsystems: Option<Subsystems<C::Engine, N>>,
    /// Set by a failed bootstrap; only a process restart recovers
    unusable: bool,
    /// Set by logout, invalidation or cache clearing
    terminated: bool,
}

/// Everything a successful start produced.
struct Started<E> {
    stores: StoreHandles,
    engine: Arc<E>,
    signals: mpsc::UnboundedReceiver<SyncSignal>,
}

impl<C, N, R, F> SessionController<C, N, R, F>
where
    C: SyncConnector,
    N: NotifyAdapter,
    R: Reloader,
    F: SubsystemFactory,
{
    pub fn new(credentials: Credentials, config: &Config, deps: ControllerDeps<C, N, R, F>) -> Self {
        Self {
            credentials,
            credentials_path: config.credentials_path.clone(),
            paths: config.stores.clone(),
            settings: SettingsStore::new(&config.settings_path),
            options: config.options.clone(),
            connector: deps.connector,
            notifier: deps.notifier,
            reloader: deps.reloader,
            factory: deps.factory,
            bus: EventBus::new(),
            state: SessionState::new(),
            stores: None,
            engine: None,
            signals: None,
            subsystems: None,
            unusable: false,
            terminated: false,
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Whether a live sync engine exists.
    pub fn is_started(&self) -> bool {
        self.engine.is_some()
    }

    /// Whether a teardown ended this session.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn stores(&self) -> Option<&StoreHandles> {
        self.stores.as_ref()
    }

    pub fn subsystems(&self) -> Option<&Subsystems<C::Engine, N>> {
        self.subsystems.as_ref()
    }

    /// Start the session and handle every notification the engine has
    /// already delivered. Calling it on a started session is a no-op.
    pub async fn init(&mut self) -> Result<(), SessionError> {
        self.start().await?;
        self.process_pending().await?;
        Ok(())
    }

    /// Open the stores, construct and start the sync engine.
    ///
    /// On failure nothing is retained: no stores, no engine, state `Null`.
    pub async fn start(&mut self) -> Result<(), SessionError> {
        if self.engine.is_some() {
            warn!(user = %self.credentials.user_id, "session already started, ignoring start");
            return Ok(());
        }
        if self.terminated {
            return Err(SessionError::Terminated);
        }
        if self.unusable {
            return Err(SessionError::Unusable);
        }

        info!(
            user = %self.credentials.user_id,
            device = %self.credentials.device_id,
            "starting session"
        );
        match self.start_inner().await {
            Ok(started) => {
                self.stores = Some(started.stores);
                self.engine = Some(started.engine);
                self.signals = Some(started.signals);
                info!("session started");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "session start failed");
                Err(e)
            }
        }
    }

    /// Strictly ordered startup. Each step relies on the previous ones.
    async fn start_inner(&self) -> Result<Started<C::Engine>, SessionError> {
        // 1. Open stores
        let stores = open_store_pair(&self.paths).map_err(SessionError::StoreOpen)?;

        // 2. Construct the engine bound to credentials and stores
        let engine = self
            .connector
            .connect(&self.credentials, &stores)
            .await
            .map_err(SessionError::Connect)?;
        let engine = Arc::new(engine);

        // 3. Register for notifications before anything can be emitted
        let signals = engine.subscribe();

        // 4. Load key material before the streaming loop starts
        let keys = stores
            .crypto
            .load_or_generate_keys(&self.credentials.device_id)
            .map_err(|e| SessionError::CryptoInit(e.to_string()))?;
        engine
            .init_crypto(&keys)
            .await
            .map_err(|e| SessionError::CryptoInit(e.to_string()))?;

        // 5. Start streaming
        if let Err(e) = engine.start(&self.options.sync).await {
            engine.stop();
            return Err(SessionError::EngineStart(e));
        }

        Ok(Started {
            stores,
            engine,
            signals,
        })
    }

    /// Wait for the next engine notification.
    ///
    /// Returns `None` immediately when no engine is live.
    pub async fn next_signal(&mut self) -> Option<SyncSignal> {
        let signal = self.signals.as_mut()?.recv().await;
        if signal.is_none() {
            self.signals = None;
        }
        signal
    }

    /// Handle every notification already delivered. Returns how many.
    pub async fn process_pending(&mut self) -> Result<usize, SessionError> {
        let mut handled = 0;
        while let Some(signal) = self.signals.as_mut().and_then(|rx| rx.try_recv().ok()) {
            self.handle_signal(signal).await?;
            handled += 1;
        }
        Ok(handled)
    }

    /// React to one engine notification.
    pub async fn handle_signal(&mut self, signal: SyncSignal) -> Result<(), SessionError> {
        if self.engine.is_none() {
            tracing::debug!(?signal, "no live engine, ignoring signal");
            return Ok(());
        }
        match signal {
            SyncSignal::StateChanged { current, previous } => {
                self.on_sync_state(current, previous).await
            }
            SyncSignal::SessionInvalidated => self.on_session_invalidated(),
        }
    }

    async fn on_sync_state(
        &mut self,
        current: SyncState,
        reported: Option<SyncState>,
    ) -> Result<(), SessionError> {
        let action = self.state.apply(current);
        let previous = self.state.previous();
        info!(
            state = %current,
            previous = ?previous,
            reported_previous = ?reported,
            "sync state"
        );
        self.bus
            .publish(LifecycleEvent::SyncStateChanged { current, previous });

        match action {
            Transition::Observe => {}
            Transition::Bootstrap => {
                self.bootstrap()?;
                if self.options.rearm_on_first_prepared {
                    self.rearm().await;
                }
            }
            Transition::Rearm => {
                if self.options.rearm_on_reconnect {
                    self.rearm().await;
                }
            }
        }
        Ok(())
    }

    /// Construct the dependent subsystems and announce it.
    fn bootstrap(&mut self) -> Result<(), SessionError> {
        let (Some(engine), Some(stores)) = (self.engine.as_ref(), self.stores.as_ref()) else {
            return Ok(());
        };
        let settings = match self.settings.load() {
            Ok(settings) => settings,
            Err(e) => {
                error!(error = %e, "bootstrap failed, session is unusable");
                self.abandon();
                return Err(SessionError::Bootstrap(e.into()));
            }
        };
        let ctx = BootstrapContext {
            engine,
            general: &stores.general,
            notifier: &self.notifier,
            settings: &settings,
            bus: &self.bus,
        };
        match subsystems::bootstrap(&self.factory, &ctx) {
            Ok(built) => {
                self.subsystems = Some(built);
                self.bus.publish(LifecycleEvent::InitLoadingFinished);
                info!("init loading finished");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "bootstrap failed, session is unusable");
                self.abandon();
                Err(e.into())
            }
        }
    }

    async fn rearm(&self) {
        if let Some(subsystems) = &self.subsystems {
            subsystems.notifications.rearm().await;
        }
    }

    /// Drop everything after a failed bootstrap. Stores are left intact.
    fn abandon(&mut self) {
        if let Some(engine) = self.engine.take() {
            engine.stop();
        }
        self.subsystems = None;
        self.signals = None;
        self.stores = None;
        self.state = SessionState::new();
        self.unusable = true;
    }

    fn on_session_invalidated(&mut self) -> Result<(), SessionError> {
        warn!(user = %self.credentials.user_id, "session invalidated by server");
        if let Some(engine) = &self.engine {
            engine.stop();
        }
        let cleared = self.wipe(ClearScope::All);
        self.forget_session();
        self.bus.publish(LifecycleEvent::SessionInvalidated);
        self.reloader.reload();
        cleared.map_err(SessionError::StoreClear)
    }

    /// Log out and destroy every piece of local session state, including
    /// the stored credential.
    ///
    /// Safe to call when never started. Every step runs even if an earlier
    /// one failed; a store-clearing failure is reported after the reload
    /// has been requested.
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        info!(user = %self.credentials.user_id, "logging out");

        // 1. Stop streaming
        if let Some(engine) = &self.engine {
            engine.stop();
        }

        // 2. Remote logout
        if let Some(engine) = self.engine.clone() {
            if let Err(e) = engine.logout().await {
                warn!(error = %e, "remote logout failed, clearing local session anyway");
            }
        }

        // 3. Both stores
        let cleared = self.wipe(ClearScope::All);

        // 4. Cached settings and the stored credential
        self.forget_session();

        // 5. Restart
        self.bus.publish(LifecycleEvent::LoggedOut);
        self.reloader.reload();
        cleared.map_err(SessionError::StoreClear)
    }

    /// Discard the derived local cache and restart. Credentials and key
    /// material are kept.
    pub fn clear_cache_and_reload(&mut self) -> Result<(), SessionError> {
        info!("clearing cache and reloading");
        if let Some(engine) = &self.engine {
            engine.stop();
        }
        let cleared = self.wipe(ClearScope::GeneralOnly);
        self.bus.publish(LifecycleEvent::CacheCleared);
        self.reloader.reload();
        cleared.map_err(SessionError::StoreClear)
    }

    /// Stop the engine for process exit, keeping every store intact.
    pub fn shutdown(&mut self) {
        if let Some(engine) = self.engine.take() {
            engine.stop();
        }
        self.subsystems = None;
        self.signals = None;
        self.stores = None;
        info!("session shut down");
    }

    /// Release subsystems and the engine, then clear stores. Marks the
    /// session terminated.
    fn wipe(&mut self, scope: ClearScope) -> Result<(), StoreError> {
        self.subsystems = None;
        self.signals = None;
        self.engine = None;
        self.terminated = true;
        let result = match self.stores.take() {
            Some(stores) => stores.clear(scope),
            None => clear_store_pair(&self.paths, scope),
        };
        match &result {
            Ok(()) => info!(?scope, "stores cleared"),
            Err(e) => warn!(?scope, error = %e, "failed to clear stores"),
        }
        result
    }

    /// Remove cached settings and the credential file, so the restarted
    /// process comes up logged out.
    fn forget_session(&self) {
        if let Err(e) = self.settings.clear() {
            warn!(error = %e, "failed to clear cached settings");
        }
        match remove_credentials(&self.credentials_path) {
            Ok(()) => info!(path = %self.credentials_path.display(), "credentials removed"),
            Err(e) => warn!(error = %e, "failed to remove stored credentials"),
        }
    }
}

#[cfg(test)]
#[path = "controller_tests/mod.rs"]
mod tests;
