use std::num::NonZeroUsize;
use std::time::Duration;

/// Maximum payload size, and therefore pad size, in bytes
pub const DEFAULT_SECRET_LENGTH: usize = 1032;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretStoreConfig {
    /// Length `L` of every pad and ciphertext. Payloads up to `L` bytes are accepted.
    pub secret_length: NonZeroUsize,
    /// How long an unredeemed secret stays retrievable.
    ///  if not set then secrets live until redeemed
    pub ttl: Option<Duration>,
}

impl Default for SecretStoreConfig {
    fn default() -> Self {
        Self {
            secret_length: NonZeroUsize::new(DEFAULT_SECRET_LENGTH)
                .unwrap_or(NonZeroUsize::MIN),
            ttl: None,
        }
    }
}
