// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

use crate::error::BootstrapError;
use crate::subsystems::{AccountData, NotificationDispatcher, OutboundQueue, RoomIndex};
use sable_adapters::{
    EngineCall, FakeNotifyAdapter, FakeReloader, FakeSyncConnector, FakeSyncEngine,
    OfflineSyncConnector,
};
use sable_core::{Settings, Topic};
use sable_storage::{load_credentials, CachedRoom, CryptoStore, GeneralStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::{tempdir, TempDir};

mod startup;
mod teardown;
mod transitions;

/// Factory that counts constructions and can refuse to build.
#[derive(Clone, Default)]
struct CountingFactory {
    attempts: Arc<AtomicUsize>,
    builds: Arc<AtomicUsize>,
    fail: Arc<parking_lot::Mutex<Option<String>>>,
}

impl CountingFactory {
    fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    fn fail_with(&self, reason: &str) {
        *self.fail.lock() = Some(reason.to_string());
    }
}

impl SubsystemFactory for CountingFactory {
    fn room_index<E, N>(
        &self,
        ctx: &BootstrapContext<'_, E, N>,
    ) -> Result<RoomIndex, BootstrapError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
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
        if let Some(reason) = self.fail.lock().clone() {
            return Err(BootstrapError::Notifications(reason));
        }
        self.builds.fetch_add(1, Ordering::SeqCst);
        Ok(NotificationDispatcher::new(
            ctx.notifier.clone(),
            rooms.clone(),
            ctx.settings,
        ))
    }
}

type TestController =
    SessionController<FakeSyncConnector, FakeNotifyAdapter, FakeReloader, CountingFactory>;

/// Fakes plus a state directory, shared by every controller it builds.
struct Harness {
    dir: TempDir,
    config: Config,
    connector: FakeSyncConnector,
    notifier: FakeNotifyAdapter,
    reloader: FakeReloader,
    factory: CountingFactory,
}

impl Harness {
    fn new() -> Self {
        Self::with_options(ControllerOptions::default())
    }

    fn with_options(options: ControllerOptions) -> Self {
        let dir = tempdir().unwrap();
        let mut config = Config::under(dir.path());
        config.options = options;
        Self {
            dir,
            config,
            connector: FakeSyncConnector::new(),
            notifier: FakeNotifyAdapter::new(),
            reloader: FakeReloader::new(),
            factory: CountingFactory::default(),
        }
    }

    fn credentials() -> Credentials {
        Credentials::new("https://hs.example.org", "token", "@alice:hs", "DEVICE")
    }

    fn controller(&self) -> TestController {
        SessionController::new(
            Self::credentials(),
            &self.config,
            ControllerDeps {
                connector: self.connector.clone(),
                notifier: self.notifier.clone(),
                reloader: self.reloader.clone(),
                factory: self.factory.clone(),
            },
        )
    }

    fn engine(&self) -> FakeSyncEngine {
        self.connector.engine()
    }

    /// Put credentials, a room and cached settings on disk before the
    /// session starts.
    fn seed(&self) {
        std::fs::write(
            &self.config.credentials_path,
            serde_json::to_vec(&Self::credentials()).unwrap(),
        )
        .unwrap();
        let general = GeneralStore::open(&self.config.stores.general).unwrap();
        general
            .put_room(CachedRoom::new("!a:hs").with_name("General"))
            .unwrap();
        SettingsStore::new(&self.config.settings_path)
            .save(&Settings {
                theme_index: 2,
                ..Settings::default()
            })
            .unwrap();
    }

    /// Controller that has been started and has seen the first `Prepared`.
    async fn prepared(&self) -> TestController {
        let mut controller = self.controller();
        controller.start().await.unwrap();
        self.engine()
            .emit_sequence(&[SyncState::Syncing, SyncState::Prepared]);
        controller.process_pending().await.unwrap();
        controller
    }

    fn general_on_disk(&self) -> GeneralStore {
        GeneralStore::open(&self.config.stores.general).unwrap()
    }

    fn crypto_bytes_on_disk(&self) -> Option<Vec<u8>> {
        CryptoStore::open(&self.config.stores.crypto)
            .unwrap()
            .raw_bytes()
            .unwrap()
    }

    /// No cached room, key material, settings or credentials left on disk.
    fn assert_local_state_destroyed(&self) {
        assert!(self.general_on_disk().is_empty(), "general store not empty");
        assert_eq!(self.crypto_bytes_on_disk(), None, "key material survived");
        assert!(
            !self.config.settings_path.exists(),
            "cached settings survived"
        );
        assert!(
            load_credentials(&self.config.credentials_path).is_err(),
            "credentials survived"
        );
    }
}

/// Drain a subscription and keep only the events of one kind.
fn count_events(sub: &mut crate::event_bus::Subscription, event: &LifecycleEvent) -> usize {
    sub.drain().iter().filter(|e| *e == event).count()
}

/// Log output captured from a `tracing` subscriber.
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<parking_lot::Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.logs.lock()).to_string()
    }

    /// Run `f` with every event up to `TRACE` written here.
    fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(self.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f)
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
