//! The ephemeral, single-read secret store
//!
//! A [`SecretStore`] converts a payload into ciphertext plus an access token and keeps
//! only `SHA-512(token) -> ciphertext`. Presenting the token once returns the payload
//! and erases the entry; every later attempt is indistinguishable from an unknown token.

mod config;
mod error;
mod store;

pub use config::{SecretStoreConfig, DEFAULT_SECRET_LENGTH};
pub use error::SecretStoreError;
pub use store::SecretStore;
