//! One-time pads and their token form

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::token::{token_length, Token};

/// Errors that can occur while creating, decoding or applying a pad
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PadError {
    #[error("random source failure: {0}")]
    RandomSource(String),
    #[error("invalid token encoding: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("invalid token length, expected {expected} characters, got {got}")]
    InvalidTokenLength { expected: usize, got: usize },
    #[error("invalid pad length, expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("length mismatch, pad is {pad} bytes but data is {data} bytes")]
    LengthMismatch { pad: usize, data: usize },
}

/// A random one-time pad
///
/// A `Pad` is generated once per stored secret and never persisted. Its base64url
/// encoding is handed back to the caller as the access [`Token`]; on redeem the pad
/// is rebuilt from that token. The backing buffer is wiped when the pad is dropped.
///
/// # Examples
///
/// ```ignore
/// let pad = Pad::generate(1032)?;
/// let ciphertext = pad.xor(&padded_payload)?;
/// let token = pad.to_token();
///
/// let rebuilt = Pad::from_token(token.as_str(), 1032)?;
/// assert_eq!(rebuilt.xor(&ciphertext)?, padded_payload);
/// ```
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Pad(Vec<u8>);

impl Pad {
    /// Generate a pad of `len` bytes from the operating system's CSPRNG
    pub fn generate(len: usize) -> Result<Self, PadError> {
        let mut pad = Self(vec![0; len]);
        getrandom::getrandom(&mut pad.0).map_err(|e| PadError::RandomSource(e.to_string()))?;
        Ok(pad)
    }

    /// Rebuild a pad from its token
    ///
    /// Decoding is strict: padding characters, characters outside the URL-safe
    /// alphabet, non-canonical trailing bits and any length other than `len` bytes
    /// are all rejected.
    pub fn from_token(token: &str, len: usize) -> Result<Self, PadError> {
        let expected = token_length(len);
        if token.len() != expected {
            return Err(PadError::InvalidTokenLength {
                expected,
                got: token.len(),
            });
        }

        let pad = Self(URL_SAFE_NO_PAD.decode(token)?);
        if pad.len() != len {
            return Err(PadError::InvalidLength {
                expected: len,
                got: pad.len(),
            });
        }
        Ok(pad)
    }

    /// Encode the pad as an access token
    pub fn to_token(&self) -> Token {
        Token::from(URL_SAFE_NO_PAD.encode(&self.0))
    }

    /// XOR `data` with the pad
    ///
    /// This is both the encrypt and the decrypt direction. `data` must be exactly
    /// as long as the pad.
    pub fn xor(&self, data: &[u8]) -> Result<Vec<u8>, PadError> {
        if data.len() != self.0.len() {
            return Err(PadError::LengthMismatch {
                pad: self.0.len(),
                data: data.len(),
            });
        }
        Ok(self.0.iter().zip(data).map(|(p, d)| p ^ d).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Pad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the pad
        write!(f, "Pad([REDACTED; {}])", self.0.len())
    }
}

/// Right-pad `payload` with zero bytes to `len`
///
/// Callers check `payload.len() <= len` first; longer input is copied up to `len`.
pub(crate) fn zero_pad(payload: &[u8], len: usize) -> Zeroizing<Vec<u8>> {
    let mut padded = Zeroizing::new(vec![0u8; len]);
    let n = payload.len().min(len);
    padded[..n].copy_from_slice(&payload[..n]);
    padded
}

/// Drop trailing zero bytes left over from [`zero_pad`]
pub(crate) fn trim_zero_padding(mut data: Vec<u8>) -> Vec<u8> {
    let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    data.truncate(end);
    data
}
