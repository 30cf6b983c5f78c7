use std::num::NonZeroUsize;

use tokio::sync::watch;

use common::prelude::{SecretStore, SecretStoreConfig};

use crate::ServiceConfig;

/// Main service state, shared by every request handler
#[derive(Clone)]
pub struct State {
    secrets: SecretStore,
    shutdown_rx: watch::Receiver<()>,
}

impl State {
    pub fn from_config(
        config: &ServiceConfig,
        shutdown_rx: watch::Receiver<()>,
    ) -> Result<Self, StateSetupError> {
        let secret_length =
            NonZeroUsize::new(config.secret_length).ok_or(StateSetupError::ZeroSecretLength)?;
        if config.sweep_interval.is_zero() {
            return Err(StateSetupError::ZeroSweepInterval);
        }

        let secrets = SecretStore::with_config(SecretStoreConfig {
            secret_length,
            ttl: config.secret_ttl,
        });
        tracing::info!(
            secret_length = secrets.secret_length(),
            token_length = secrets.token_length(),
            ttl = ?config.secret_ttl,
            "secret store initialized"
        );

        Ok(Self::new(secrets, shutdown_rx))
    }

    pub fn new(secrets: SecretStore, shutdown_rx: watch::Receiver<()>) -> Self {
        Self {
            secrets,
            shutdown_rx,
        }
    }

    pub fn secrets(&self) -> &SecretStore {
        &self.secrets
    }

    /// True once shutdown has been signalled, or the signal sender is gone
    pub fn is_shutting_down(&self) -> bool {
        !matches!(self.shutdown_rx.has_changed(), Ok(false))
    }
}

impl AsRef<SecretStore> for State {
    fn as_ref(&self) -> &SecretStore {
        &self.secrets
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateSetupError {
    #[error("secret length must be greater than zero")]
    ZeroSecretLength,
    #[error("sweep interval must be greater than zero")]
    ZeroSweepInterval,
}
