use clap::Args;
use url::Url;

use common::prelude::DEFAULT_SECRET_LENGTH;
use vsl_daemon::service_config::DEFAULT_LISTEN_PORT;
use vsl_daemon::state::{AppConfig, AppState};

#[derive(Args, Debug, Clone)]
pub struct Init {
    /// HTTP server listen port
    #[arg(long, default_value_t = DEFAULT_LISTEN_PORT)]
    pub listen_port: u16,

    /// Maximum secret size in bytes
    #[arg(long, default_value_t = DEFAULT_SECRET_LENGTH)]
    pub secret_length: usize,

    /// Seconds an unredeemed secret is kept (optional, no expiry if not set)
    #[arg(long)]
    pub secret_ttl_secs: Option<u64>,

    /// External URL used for share links (e.g., https://secrets.example.com)
    #[arg(long)]
    pub public_url: Option<Url>,
}

#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("init failed: {0}")]
    StateFailed(#[from] vsl_daemon::state::StateError),
    #[error("secret length must be greater than zero")]
    ZeroSecretLength,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Init {
    type Error = InitError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        if self.secret_length == 0 {
            return Err(InitError::ZeroSecretLength);
        }

        let config = AppConfig {
            listen_port: self.listen_port,
            secret_length: self.secret_length,
            secret_ttl_secs: self.secret_ttl_secs,
            public_url: self.public_url.clone(),
            ..Default::default()
        };

        let state = AppState::init(ctx.config_path.clone(), Some(config))?;

        let ttl_str = match state.config.secret_ttl_secs {
            Some(secs) => format!("{}s", secs),
            None => "none (kept until redeemed)".to_string(),
        };
        let public_url_str = match &state.config.public_url {
            Some(url) => url.to_string(),
            None => format!("http://localhost:{}", state.config.listen_port),
        };

        let output = format!(
            "Initialized vsl directory at: {}\n\
             - Config: {}\n\
             - Listen port: {}\n\
             - Secret length: {} bytes\n\
             - Secret TTL: {}\n\
             - Share links: {}",
            state.vsl_dir.display(),
            state.config_path.display(),
            state.config.listen_port,
            state.config.secret_length,
            ttl_str,
            public_url_str
        );

        Ok(output)
    }
}
