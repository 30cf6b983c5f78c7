use std::time::Duration;

use clap::Args;

use vsl_daemon::spawn_service;
use vsl_daemon::state::AppState;

#[derive(Args, Debug, Clone)]
pub struct Daemon {
    /// Override HTTP server port (default from config)
    #[arg(long)]
    pub listen_port: Option<u16>,

    /// Directory for log files (logs to stdout only if not set)
    #[arg(long)]
    pub log_dir: Option<std::path::PathBuf>,

    /// Override how long unredeemed secrets are kept, in seconds (default from config)
    #[arg(long)]
    pub secret_ttl_secs: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("state error: {0}")]
    StateError(#[from] vsl_daemon::state::StateError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Daemon {
    type Error = DaemonError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // Load config from config path (or default ~/.vsl), defaults if never initialized
        let app_config = AppState::load_config_or_default(ctx.config_path.clone())?;

        let mut config = app_config.to_service_config(self.log_dir.clone());
        if let Some(port) = self.listen_port {
            config.listen_port = port;
        }
        if let Some(secs) = self.secret_ttl_secs {
            config.secret_ttl = Some(Duration::from_secs(secs));
        }

        spawn_service(&config).await;
        Ok("daemon ended".to_string())
    }
}
