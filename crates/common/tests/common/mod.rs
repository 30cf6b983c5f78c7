//! Shared test utilities for secret store integration tests
#![allow(dead_code)]

use std::num::NonZeroUsize;
use std::time::Duration;

use ::common::crypto::Token;
use ::common::secret_store::{SecretStore, SecretStoreConfig};

/// Set up a store with the default 1032 byte secret length and no expiry
pub fn setup_store() -> SecretStore {
    SecretStore::new()
}

/// Set up a store with a custom secret length and optional TTL
pub fn setup_store_with(secret_length: usize, ttl: Option<Duration>) -> SecretStore {
    SecretStore::with_config(SecretStoreConfig {
        secret_length: NonZeroUsize::new(secret_length).unwrap(),
        ttl,
    })
}

/// Store `payload` and return its token, panicking on failure
pub fn store_str(store: &SecretStore, payload: &str) -> Token {
    store.store(payload.as_bytes()).unwrap()
}
