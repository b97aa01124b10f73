// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sable session daemon (sabled)
//!
//! Runs one client session: opens the stores, starts the sync engine and
//! keeps the session alive until it is torn down or the process is
//! signalled. A teardown restarts the process.

use sable_adapters::{
    restart_current_process, DesktopNotifyAdapter, OfflineSyncConnector, TracedConnector,
};
use sable_core::Topic;
use sable_session::{
    Config, ConfigError, ControllerDeps, DefaultSubsystems, ReloadSignal, SessionController,
    SessionRunner,
};
use sable_storage::load_credentials;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle info flags before touching the state directory
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("sabled {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("sabled {}", env!("CARGO_PKG_VERSION"));
                println!("Sable session daemon - keeps one end-to-end encrypted sync session alive");
                println!();
                println!("USAGE:");
                println!("    sabled");
                println!();
                println!("Credentials are read from credentials.json in the state directory");
                println!("($SABLE_STATE_DIR, $XDG_STATE_HOME/sable or ~/.local/state/sable).");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: sabled [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config = Config::load()?;
    let log_guard = setup_logging(&config)?;

    info!(state_dir = %config.state_dir.display(), "starting session daemon");

    let credentials = match load_credentials(&config.credentials_path) {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(error = %e, "failed to load credentials");
            eprintln!("sabled: {e}");
            eprintln!("  log in first to create {}", config.credentials_path.display());
            drop(log_guard);
            std::process::exit(1);
        }
    };

    let reload = ReloadSignal::new();
    let controller = SessionController::new(
        credentials,
        &config,
        ControllerDeps {
            connector: TracedConnector::new(OfflineSyncConnector::new()),
            notifier: DesktopNotifyAdapter::new(),
            reloader: reload.clone(),
            factory: DefaultSubsystems,
        },
    );
    let (handle, runner) = SessionRunner::spawn(controller);
    let mut events = handle.subscribe(Topic::All);

    if let Err(e) = handle.init().await {
        error!(error = %e, "session failed to start");
        drop(handle);
        let _ = runner.await;
        drop(log_guard);
        return Err(e.into());
    }

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    info!("session ready");

    loop {
        tokio::select! {
            Some(event) = events.recv() => {
                debug!(event = event.name(), "lifecycle event");
            }

            _ = reload.requested() => {
                info!("session torn down, restarting");
                break;
            }

            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                break;
            }

            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                break;
            }
        }
    }

    drop(handle);
    if let Err(e) = runner.await {
        error!(error = %e, "session runner panicked");
    }

    if reload.is_requested() {
        drop(log_guard);
        // Only returns on failure
        let e = restart_current_process();
        return Err(e.into());
    }

    info!("session daemon stopped");
    Ok(())
}

fn setup_logging(
    config: &Config,
) -> Result<tracing_appender::non_blocking::WorkerGuard, ConfigError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Create log directory if needed
    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_appender::rolling::never(
        config.log_path.parent().ok_or(ConfigError::NoStateDir)?,
        config
            .log_path
            .file_name()
            .ok_or(ConfigError::NoStateDir)?,
    );
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    Ok(guard)
}
