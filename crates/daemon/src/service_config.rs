use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use common::prelude::DEFAULT_SECRET_LENGTH;

pub const DEFAULT_LISTEN_PORT: u16 = 8080;
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct Config {
    // http server configuration
    /// Port for the HTTP server, bound on all interfaces
    pub listen_port: u16,
    /// External URL (e.g., "https://secrets.example.com")
    /// Used for generating share links,
    ///  if not set then http://localhost:<listen_port> is used
    pub public_url: Option<Url>,

    // secret store configuration
    /// Maximum secret size in bytes, also the pad length
    pub secret_length: usize,
    /// How long an unredeemed secret is kept,
    ///  if not set then secrets live until redeemed or restart
    pub secret_ttl: Option<Duration>,
    /// How often expired secrets are swept, only used with a ttl
    pub sweep_interval: Duration,

    // logging
    pub log_level: tracing::Level,
    /// Directory for log files (optional, logs to stdout only if not set)
    pub log_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_LISTEN_PORT,
            public_url: None,
            secret_length: DEFAULT_SECRET_LENGTH,
            secret_ttl: None,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            log_level: tracing::Level::INFO,
            log_dir: None,
        }
    }
}
