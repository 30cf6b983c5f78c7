use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};

/// Length of a hex encoded SHA-512 digest
pub const LOOKUP_KEY_HEX_LENGTH: usize = 128;

/// Number of characters in the unpadded base64url encoding of `secret_length` bytes
pub fn token_length(secret_length: usize) -> usize {
    (secret_length * 4).div_ceil(3)
}

/// The access token handed out by `SecretStore::store`
///
/// A token is the URL-safe, unpadded base64 encoding of a one-time pad. It is the
/// only credential that can redeem the secret, so it is never logged or stored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Token {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token([REDACTED; {}])", self.0.len())
    }
}

/// Map key under which a secret's ciphertext is stored
///
/// Derived as the hex SHA-512 digest of the token string. Knowing a lookup key
/// does not reveal the token, so the map alone cannot decrypt anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey(String);

impl LookupKey {
    pub fn derive(token: &str) -> Self {
        Self(hex::encode(Sha512::digest(token.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
