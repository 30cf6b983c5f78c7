//! Application state management for vsl config directories
//!
//! This module handles loading and managing vsl configuration from
//! config directories (like ~/.vsl or custom paths). The CLI reads it
//! to build the daemon's [`ServiceConfig`](crate::ServiceConfig).

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use common::prelude::DEFAULT_SECRET_LENGTH;

use crate::service_config::{DEFAULT_LISTEN_PORT, DEFAULT_SWEEP_INTERVAL};
use crate::ServiceConfig;

pub const APP_NAME: &str = "vsl";
pub const CONFIG_FILE_NAME: &str = "config.toml";

fn default_sweep_interval_secs() -> u64 {
    DEFAULT_SWEEP_INTERVAL.as_secs()
}

/// Configuration stored in config.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Port for the HTTP server
    pub listen_port: u16,
    /// Maximum secret size in bytes
    pub secret_length: usize,
    /// Seconds an unredeemed secret is kept (optional, no expiry if not set)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ttl_secs: Option<u64>,
    /// Seconds between sweeps for expired secrets
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// External URL used for share links
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<Url>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_LISTEN_PORT,
            secret_length: DEFAULT_SECRET_LENGTH,
            secret_ttl_secs: None,
            sweep_interval_secs: default_sweep_interval_secs(),
            public_url: None,
        }
    }
}

impl AppConfig {
    /// Convert to ServiceConfig for the daemon
    pub fn to_service_config(&self, log_dir: Option<PathBuf>) -> ServiceConfig {
        ServiceConfig {
            listen_port: self.listen_port,
            public_url: self.public_url.clone(),
            secret_length: self.secret_length,
            secret_ttl: self.secret_ttl_secs.map(Duration::from_secs),
            sweep_interval: Duration::from_secs(self.sweep_interval_secs),
            log_level: tracing::Level::INFO,
            log_dir,
        }
    }
}

/// Application state representing a vsl config directory
#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the vsl directory (~/.vsl or custom)
    pub vsl_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the vsl directory path (custom or default ~/.vsl)
    pub fn vsl_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new vsl state directory
    pub fn init(custom_path: Option<PathBuf>, config: Option<AppConfig>) -> Result<Self, StateError> {
        let vsl_dir = Self::vsl_dir(custom_path)?;
        let config_path = vsl_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&vsl_dir)?;

        let config = config.unwrap_or_default();
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            vsl_dir,
            config_path,
            config,
        })
    }

    /// Load existing state from vsl directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let vsl_dir = Self::vsl_dir(custom_path)?;

        if !vsl_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_path = vsl_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            vsl_dir,
            config_path,
            config,
        })
    }

    /// Load the stored config, or the defaults if the directory was never initialized
    pub fn load_config_or_default(custom_path: Option<PathBuf>) -> Result<AppConfig, StateError> {
        match Self::load(custom_path) {
            Ok(state) => Ok(state.config),
            Err(StateError::NotInitialized) => Ok(AppConfig::default()),
            Err(e) => Err(e),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("vsl directory not initialized. Run 'vsl init' first or use --config-path")]
    NotInitialized,

    #[error("vsl directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_init_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let vsl_dir = temp_dir.path().join("vsl");

        let config = AppConfig {
            listen_port: 9090,
            secret_ttl_secs: Some(3600),
            public_url: Some(Url::parse("https://secrets.example.com").unwrap()),
            ..Default::default()
        };
        let state = AppState::init(Some(vsl_dir.clone()), Some(config.clone())).unwrap();
        assert!(state.config_path.exists());

        let loaded = AppState::load(Some(vsl_dir)).unwrap();
        assert_eq!(loaded.config, config);
    }

    #[test]
    fn test_init_twice_fails() {
        let temp_dir = TempDir::new().unwrap();
        let vsl_dir = temp_dir.path().join("vsl");

        AppState::init(Some(vsl_dir.clone()), None).unwrap();
        assert!(matches!(
            AppState::init(Some(vsl_dir), None),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_load_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");

        assert!(matches!(
            AppState::load(Some(missing.clone())),
            Err(StateError::NotInitialized)
        ));
        assert_eq!(
            AppState::load_config_or_default(Some(missing)).unwrap(),
            AppConfig::default()
        );
    }

    #[test]
    fn test_load_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            AppState::load(Some(temp_dir.path().to_path_buf())),
            Err(StateError::MissingFile(_))
        ));
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: AppConfig = toml::from_str("listen_port = 8000\nsecret_length = 64\n").unwrap();
        assert_eq!(config.sweep_interval_secs, 60);
        assert_eq!(config.secret_ttl_secs, None);
        assert_eq!(config.public_url, None);

        let service_config = config.to_service_config(None);
        assert_eq!(service_config.listen_port, 8000);
        assert_eq!(service_config.secret_length, 64);
        assert_eq!(service_config.secret_ttl, None);
    }
}
