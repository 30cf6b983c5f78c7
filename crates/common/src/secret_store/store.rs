use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use zeroize::Zeroize;

use super::{SecretStoreConfig, SecretStoreError};
use crate::crypto::{token_length, trim_zero_padding, zero_pad, LookupKey, Pad, Token};

/// Ciphertext held for one secret
struct Entry {
    ciphertext: Vec<u8>,
    stored_at: Instant,
}

impl Entry {
    fn is_expired(&self, ttl: Option<Duration>, now: Instant) -> bool {
        ttl.is_some_and(|ttl| now.saturating_duration_since(self.stored_at) > ttl)
    }
}

impl Drop for Entry {
    fn drop(&mut self) {
        self.ciphertext.zeroize();
    }
}

struct Inner {
    config: SecretStoreConfig,
    entries: Mutex<HashMap<LookupKey, Entry>>,
}

/// In-memory store of one-time secrets
///
/// Cloning a `SecretStore` is cheap and every clone shares the same entries, so a
/// single store can be constructed at startup and handed to every request handler.
///
/// # Concurrency
///
/// One mutex guards the whole map. `store` holds it only for the insert; `redeem`
/// holds it only for a single `remove`, which makes lookup-and-delete one atomic
/// step: when two callers redeem the same token concurrently exactly one of them
/// gets the entry. Pad generation, hashing and XOR all run outside the lock.
///
/// # Examples
///
/// ```ignore
/// let store = SecretStore::new();
/// let token = store.store(b"hello")?;
///
/// assert_eq!(store.redeem(token.as_str())?, b"hello");
/// assert_eq!(store.redeem(token.as_str()), Err(SecretStoreError::NotFound));
/// ```
#[derive(Clone)]
pub struct SecretStore {
    inner: Arc<Inner>,
}

impl Default for SecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SecretStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretStore")
            .field("config", &self.inner.config)
            .field("entries", &self.len())
            .finish()
    }
}

impl SecretStore {
    /// Create an empty store with the default secret length and no expiry
    pub fn new() -> Self {
        Self::with_config(SecretStoreConfig::default())
    }

    pub fn with_config(config: SecretStoreConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                entries: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn config(&self) -> &SecretStoreConfig {
        &self.inner.config
    }

    /// Maximum payload length `L` in bytes
    pub fn secret_length(&self) -> usize {
        self.inner.config.secret_length.get()
    }

    /// Length in characters of every token this store issues
    pub fn token_length(&self) -> usize {
        token_length(self.secret_length())
    }

    /// Encrypt `payload` under a fresh one-time pad and keep the ciphertext
    ///
    /// Returns the token that is the only way to ever read the payload back.
    ///
    /// # Errors
    ///
    /// - [`SecretStoreError::InvalidInput`] if `payload` is longer than [`Self::secret_length`]
    /// - [`SecretStoreError::RandomSourceFailure`] if no pad could be generated
    ///
    /// Neither error modifies the store.
    pub fn store(&self, payload: &[u8]) -> Result<Token, SecretStoreError> {
        let secret_length = self.secret_length();
        if payload.len() > secret_length {
            return Err(SecretStoreError::InvalidInput {
                len: payload.len(),
                max: secret_length,
            });
        }

        let padded = zero_pad(payload, secret_length);
        let pad = Pad::generate(secret_length)?;
        let ciphertext = pad.xor(&padded)?;
        let token = pad.to_token();
        let lookup_key = LookupKey::derive(token.as_str());

        let entry = Entry {
            ciphertext,
            stored_at: Instant::now(),
        };
        // A colliding pad overwrites; with L random bytes this does not happen in practice
        self.inner.entries.lock().insert(lookup_key, entry);

        Ok(token)
    }

    /// Return the payload stored under `token` and erase it
    ///
    /// Trailing zero bytes are stripped from the decrypted payload, so a payload
    /// that genuinely ends in `0x00` comes back shorter than it went in.
    ///
    /// # Errors
    ///
    /// - [`SecretStoreError::InvalidToken`] if `token` is not a strict base64url
    ///   encoding of exactly [`Self::secret_length`] bytes; the store is untouched
    /// - [`SecretStoreError::NotFound`] if no live entry matches, whether the token
    ///   was never issued, was already redeemed or has expired
    pub fn redeem(&self, token: &str) -> Result<Vec<u8>, SecretStoreError> {
        let pad = Pad::from_token(token, self.secret_length())?;
        let lookup_key = LookupKey::derive(token);

        let entry = self
            .inner
            .entries
            .lock()
            .remove(&lookup_key)
            .ok_or(SecretStoreError::NotFound)?;

        if entry.is_expired(self.inner.config.ttl, Instant::now()) {
            return Err(SecretStoreError::NotFound);
        }

        let padded = pad.xor(&entry.ciphertext)?;
        Ok(trim_zero_padding(padded))
    }

    /// Drop every entry older than the configured TTL
    ///
    /// Returns how many entries were removed. Without a TTL this is a no-op.
    pub fn purge_expired(&self) -> usize {
        let Some(ttl) = self.inner.config.ttl else {
            return 0;
        };

        let now = Instant::now();
        let mut entries = self.inner.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(Some(ttl), now));
        before - entries.len()
    }

    /// Number of secrets currently held
    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    fn store_with(secret_length: usize, ttl: Option<Duration>) -> SecretStore {
        SecretStore::with_config(SecretStoreConfig {
            secret_length: NonZeroUsize::new(secret_length).unwrap(),
            ttl,
        })
    }

    #[test]
    fn test_store_and_redeem() {
        let store = SecretStore::new();
        let token = store.store(b"hello").unwrap();

        assert_eq!(token.as_str().len(), 1376);
        assert_eq!(store.len(), 1);
        assert_eq!(store.redeem(token.as_str()).unwrap(), b"hello".to_vec());
        assert!(store.is_empty());
        assert_eq!(
            store.redeem(token.as_str()),
            Err(SecretStoreError::NotFound)
        );
    }

    #[test]
    fn test_state_never_contains_token() {
        let store = SecretStore::new();
        let token = store.store(b"hello").unwrap();

        let entries = store.inner.entries.lock();
        let (key, entry) = entries.iter().next().unwrap();
        assert_eq!(key, &LookupKey::derive(token.as_str()));
        assert_ne!(key.as_str(), token.as_str());
        assert_eq!(entry.ciphertext.len(), 1032);
        assert_ne!(&entry.ciphertext[..5], b"hello");
    }

    #[test]
    fn test_invalid_token_leaves_store_untouched() {
        let store = SecretStore::new();
        let token = store.store(b"keep me").unwrap();

        assert_eq!(store.redeem("not a token"), Err(SecretStoreError::InvalidToken));
        assert_eq!(store.len(), 1);
        assert_eq!(store.redeem(token.as_str()).unwrap(), b"keep me".to_vec());
    }

    #[test]
    fn test_custom_secret_length() {
        let store = store_with(9, None);
        assert_eq!(store.token_length(), 12);

        let token = store.store(b"123456789").unwrap();
        assert_eq!(token.as_str().len(), 12);
        assert_eq!(store.redeem(token.as_str()).unwrap(), b"123456789".to_vec());
        assert_eq!(
            store.store(b"1234567890"),
            Err(SecretStoreError::InvalidInput { len: 10, max: 9 })
        );
    }

    #[test]
    fn test_expired_secret_is_not_found() {
        let store = store_with(32, Some(Duration::ZERO));
        let token = store.store(b"short lived").unwrap();
        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(
            store.redeem(token.as_str()),
            Err(SecretStoreError::NotFound)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_purge_expired() {
        let store = store_with(32, Some(Duration::ZERO));
        store.store(b"one").unwrap();
        store.store(b"two").unwrap();
        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(store.purge_expired(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_purge_without_ttl_keeps_everything() {
        let store = SecretStore::new();
        store.store(b"one").unwrap();
        assert_eq!(store.purge_expired(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_long_ttl_keeps_secret() {
        let store = store_with(32, Some(Duration::from_secs(3600)));
        let token = store.store(b"still here").unwrap();
        assert_eq!(store.purge_expired(), 0);
        assert_eq!(store.redeem(token.as_str()).unwrap(), b"still here".to_vec());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = SecretStore::new();
        let other = store.clone();
        let token = store.store(b"shared").unwrap();
        assert_eq!(other.redeem(token.as_str()).unwrap(), b"shared".to_vec());
        assert_eq!(
            store.redeem(token.as_str()),
            Err(SecretStoreError::NotFound)
        );
    }

    #[test]
    fn test_debug_hides_entries() {
        let store = SecretStore::new();
        store.store(b"hidden").unwrap();
        let debug = format!("{:?}", store);
        assert!(debug.contains("entries: 1"));
        assert!(!debug.contains("hidden"));
    }
}
