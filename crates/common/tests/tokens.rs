//! Integration tests for malformed and tampered tokens

mod common;

use ::common::secret_store::SecretStoreError;

#[test]
fn test_extended_token_is_rejected() {
    let store = common::setup_store();
    let token = common::store_str(&store, "test");

    let extended = format!("{}a", token.as_str());
    assert_eq!(store.redeem(&extended), Err(SecretStoreError::InvalidToken));

    // The genuine token still works afterwards
    assert_eq!(store.redeem(token.as_str()).unwrap(), b"test");
}

#[test]
fn test_truncated_token_is_rejected() {
    let store = common::setup_store();
    let token = common::store_str(&store, "test");

    let truncated = &token.as_str()[..token.as_str().len() - 1];
    assert_eq!(store.redeem(truncated), Err(SecretStoreError::InvalidToken));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_garbage_tokens_are_rejected() {
    let store = common::setup_store();
    common::store_str(&store, "test");

    let slashes = "/".repeat(10);
    let padded = format!("{}==", "A".repeat(store.token_length() - 2));
    let standard_alphabet = "+".repeat(store.token_length());
    for token in ["", "a", slashes.as_str(), padded.as_str(), standard_alphabet.as_str()] {
        assert_eq!(store.redeem(token), Err(SecretStoreError::InvalidToken));
    }
    assert_eq!(store.len(), 1);
}

#[test]
fn test_well_formed_unknown_token_is_not_found() {
    let store = common::setup_store();
    common::store_str(&store, "test");

    let unknown = "A".repeat(store.token_length());
    assert_eq!(store.redeem(&unknown), Err(SecretStoreError::NotFound));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_flipped_character_is_not_found() {
    let store = common::setup_store();
    let token = common::store_str(&store, "test");

    let mut chars: Vec<char> = token.as_str().chars().collect();
    chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
    let tampered: String = chars.into_iter().collect();

    assert_eq!(store.redeem(&tampered), Err(SecretStoreError::NotFound));
    assert_eq!(store.redeem(token.as_str()).unwrap(), b"test");
}
