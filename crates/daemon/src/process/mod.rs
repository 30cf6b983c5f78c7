pub mod utils;

use std::net::SocketAddr;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::watch;
use tokio::time::{timeout, MissedTickBehavior};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use common::prelude::SecretStore;

const FINAL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

use crate::http_server;
use crate::{ServiceConfig, ServiceState};

/// Handle for gracefully shutting down the daemon service.
pub struct ShutdownHandle {
    graceful_waiter: tokio::task::JoinHandle<utils::ShutdownReason>,
    handles: Vec<tokio::task::JoinHandle<()>>,
    shutdown_tx: watch::Sender<()>,
}

impl ShutdownHandle {
    /// Block until the service shuts down (via signal or explicit shutdown).
    pub async fn wait(self) {
        shutdown_and_join(self.graceful_waiter, self.handles).await;
    }

    /// Trigger shutdown programmatically.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// Initialize logging, panic handler, and build info reporting.
/// Returns guards that must be kept alive for the duration of the program.
fn init_logging(
    service_config: &ServiceConfig,
) -> Vec<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::fmt::format::FmtSpan;

    let mut guards = Vec::new();

    // Stdout layer
    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(stdout_guard);

    let stdout_env_filter = EnvFilter::builder()
        .with_default_directive(service_config.log_level.into())
        .from_env_lossy();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(stdout_writer)
        .with_filter(stdout_env_filter);

    // File layer (if log_dir is set)
    if let Some(log_dir) = &service_config.log_dir {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!(
                "Warning: Failed to create log directory {:?}: {}",
                log_dir, e
            );
        }

        let file_appender = tracing_appender::rolling::daily(log_dir, "vsl.log");
        let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
        guards.push(file_guard);

        let file_env_filter = EnvFilter::builder()
            .with_default_directive(service_config.log_level.into())
            .from_env_lossy();

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(file_env_filter);

        tracing_subscriber::registry()
            .with(stdout_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry().with(stdout_layer).init();
    }

    utils::register_panic_logger();
    utils::report_build_info();

    guards
}

/// Create service state from config, exiting on error.
fn create_state(service_config: &ServiceConfig, shutdown_rx: watch::Receiver<()>) -> ServiceState {
    match ServiceState::from_config(service_config, shutdown_rx) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("error creating server state: {}", e);
            std::process::exit(3);
        }
    }
}

/// Wait for shutdown and join all handles with timeout.
async fn shutdown_and_join(
    graceful_waiter: tokio::task::JoinHandle<utils::ShutdownReason>,
    handles: Vec<tokio::task::JoinHandle<()>>,
) {
    match graceful_waiter.await {
        Ok(reason) => tracing::info!(%reason, tasks = handles.len(), "waiting for tasks to stop"),
        Err(e) => tracing::error!("shutdown waiter failed: {}", e),
    }

    if timeout(FINAL_SHUTDOWN_TIMEOUT, join_all(handles))
        .await
        .is_err()
    {
        tracing::error!(
            "Failed to shut down within {} seconds",
            FINAL_SHUTDOWN_TIMEOUT.as_secs()
        );
        std::process::exit(4);
    }
}

/// Periodically drop expired secrets until shutdown is signalled.
pub async fn run_sweeper(
    secrets: SecretStore,
    period: Duration,
    mut shutdown_rx: watch::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let purged = secrets.purge_expired();
                if purged > 0 {
                    tracing::info!(purged, remaining = secrets.len(), "purged expired secrets");
                }
            }
            _ = shutdown_rx.changed() => {
                tracing::debug!("sweeper shutting down");
                break;
            }
        }
    }
}

/// Create state and spawn background tasks, returning the state handle.
///
/// The returned `ShutdownHandle` must be kept alive; dropping it does not stop the service.
pub async fn start_service(service_config: &ServiceConfig) -> (ServiceState, ShutdownHandle) {
    let (graceful_waiter, shutdown_tx, shutdown_rx) = match utils::graceful_shutdown_blocker() {
        Ok(blocker) => blocker,
        Err(e) => {
            tracing::error!("failed to install signal handlers: {}", e);
            std::process::exit(2);
        }
    };
    let state = create_state(service_config, shutdown_rx.clone());

    let mut handles = Vec::new();

    // Spawn HTTP server
    let listen_addr = SocketAddr::from(([0, 0, 0, 0], service_config.listen_port));
    let http_config = match http_server::Config::new(
        listen_addr,
        service_config.public_url.clone(),
        service_config.log_level,
    ) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid HTTP server config: {}", e);
            std::process::exit(3);
        }
    };
    let http_state = state.clone();
    let http_rx = shutdown_rx.clone();
    let http_handle = tokio::spawn(async move {
        if let Err(e) = http_server::run_app(http_config, http_state, http_rx).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });
    handles.push(http_handle);

    // Spawn expiry sweeper, only useful with a ttl
    if service_config.secret_ttl.is_some() {
        let secrets = state.secrets().clone();
        let period = service_config.sweep_interval;
        let sweeper_rx = shutdown_rx.clone();
        handles.push(tokio::spawn(run_sweeper(secrets, period, sweeper_rx)));
    }

    tracing::info!(
        "Running: HTTP server on port {} (expiry {})",
        service_config.listen_port,
        match service_config.secret_ttl {
            Some(ttl) => format!("after {}s", ttl.as_secs()),
            None => "disabled".to_string(),
        }
    );

    let handle = ShutdownHandle {
        graceful_waiter,
        handles,
        shutdown_tx,
    };

    (state, handle)
}

/// Spawns the daemon service: HTTP server + expiry sweeper.
/// Blocks until shutdown signal is received. Use for CLI binary usage.
pub async fn spawn_service(service_config: &ServiceConfig) {
    let _guards = init_logging(service_config);
    let (_, handle) = start_service(service_config).await;
    handle.wait().await;
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use common::prelude::SecretStoreConfig;

    use super::*;

    #[tokio::test]
    async fn test_sweeper_purges_and_stops() {
        let secrets = SecretStore::with_config(SecretStoreConfig {
            secret_length: NonZeroUsize::new(32).unwrap(),
            ttl: Some(Duration::from_millis(10)),
        });
        secrets.store(b"expiring").unwrap();

        let (tx, rx) = watch::channel(());
        let sweeper = tokio::spawn(run_sweeper(
            secrets.clone(),
            Duration::from_millis(20),
            rx,
        ));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(secrets.is_empty());

        tx.send(()).unwrap();
        timeout(Duration::from_secs(1), sweeper)
            .await
            .unwrap()
            .unwrap();
    }
}
