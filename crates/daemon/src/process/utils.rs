use std::fmt;
use std::time::Duration;

use tokio::signal::unix::{signal, Signal, SignalKind};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Time in-flight requests get to finish after SIGTERM before shutdown is broadcast
const SIGTERM_GRACE_PERIOD: Duration = Duration::from_secs(10);

/// What ended the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    Interrupt,
    Terminate,
    Requested,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownReason::Interrupt => f.write_str("SIGINT"),
            ShutdownReason::Terminate => f.write_str("SIGTERM"),
            ShutdownReason::Requested => f.write_str("shutdown request"),
        }
    }
}

struct ShutdownSignals {
    interrupt: Signal,
    terminate: Signal,
}

impl ShutdownSignals {
    fn install() -> std::io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn wait(&mut self, requested_rx: &mut watch::Receiver<()>) -> ShutdownReason {
        tokio::select! {
            _ = self.interrupt.recv() => ShutdownReason::Interrupt,
            _ = self.terminate.recv() => ShutdownReason::Terminate,
            _ = requested_rx.changed() => ShutdownReason::Requested,
        }
    }
}

/// Install signal handlers and spawn the task that broadcasts shutdown
///
/// The task finishes on SIGINT, on SIGTERM after a grace period, or as soon as
/// anything sends on the returned sender. It then sends on the watch so every
/// receiver sees the change, and resolves to the reason.
pub fn graceful_shutdown_blocker() -> std::io::Result<(
    JoinHandle<ShutdownReason>,
    watch::Sender<()>,
    watch::Receiver<()>,
)> {
    let mut signals = ShutdownSignals::install()?;
    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let broadcast_tx = shutdown_tx.clone();
    let mut requested_rx = shutdown_rx.clone();

    let handle = tokio::spawn(async move {
        let reason = signals.wait(&mut requested_rx).await;
        tracing::info!(%reason, "shutdown initiated");

        if reason == ShutdownReason::Terminate {
            tokio::time::sleep(SIGTERM_GRACE_PERIOD).await;
        }

        let _ = broadcast_tx.send(());
        reason
    });

    Ok((handle, shutdown_tx, shutdown_rx))
}

/// Route panics through `tracing` so they land in the log file too
pub fn register_panic_logger() {
    std::panic::set_hook(Box::new(|panic| {
        let thread = std::thread::current();
        let thread = thread.name().unwrap_or("<unnamed>");
        match panic.location() {
            Some(loc) => tracing::error!(
                message = %panic,
                thread,
                panic.file = loc.file(),
                panic.line = loc.line(),
            ),
            None => tracing::error!(message = %panic, thread),
        }
    }));
}

pub fn report_build_info() {
    let build = common::prelude::build_info();

    tracing::info!(
        version = build.version,
        profile = build.build_profile,
        features = build.build_features,
        built_at = build.build_timestamp,
        "vsl-secrets starting"
    );
}
