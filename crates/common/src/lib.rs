/**
 * Cryptographic types and operations.
 *  - One-time pads and their token encoding
 *  - Lookup key derivation from tokens
 */
pub mod crypto;
/**
 * The ephemeral secret store.
 * Holds ciphertext indexed by a hash of the
 *  access token and hands each secret out
 *  at most once.
 */
pub mod secret_store;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub use version::build_info;

pub mod prelude {
    pub use crate::crypto::{LookupKey, Pad, PadError, Token};
    pub use crate::secret_store::{
        SecretStore, SecretStoreConfig, SecretStoreError, DEFAULT_SECRET_LENGTH,
    };
    pub use crate::version::{build_info, BuildInfo};
}
