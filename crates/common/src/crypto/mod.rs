//! Cryptographic primitives for vsl-secrets
//!
//! This module provides the encoding scheme behind every stored secret:
//!
//! - **One-time pad**: a fresh random byte sequence as long as the padded payload,
//!   combined with it by XOR to produce the ciphertext
//! - **Token**: the URL-safe, unpadded base64 encoding of the pad; the only
//!   credential that can ever decrypt the secret
//! - **Lookup key**: the hex SHA-512 digest of the token, used to index ciphertext
//!   so the server never keeps the token itself
//!
//! # Security Model
//!
//! ## What is stored
//! Only `lookup_key -> ciphertext`. Neither the pad nor the token survive a
//! `store` call, and the lookup key cannot be inverted back into the token.
//!
//! ## What is not protected
//! An attacker with access to process memory while a request is in flight can see
//! the pad. Pads are zeroized when dropped to narrow that window, not to close it.

mod pad;
mod token;

pub use pad::{Pad, PadError};
pub(crate) use pad::{trim_zero_padding, zero_pad};
pub use token::{token_length, LookupKey, Token, LOOKUP_KEY_HEX_LENGTH};
