//! Integration tests for payload and token size limits

mod common;

use ::common::secret_store::{SecretStoreError, DEFAULT_SECRET_LENGTH};

#[test]
fn test_payload_at_limit() {
    let store = common::setup_store();

    let payload = "a".repeat(DEFAULT_SECRET_LENGTH);
    let token = common::store_str(&store, &payload);
    assert_eq!(store.redeem(token.as_str()).unwrap(), payload.as_bytes());

    let token = common::store_str(&store, "");
    assert!(store.redeem(token.as_str()).unwrap().is_empty());
}

#[test]
fn test_payload_over_limit() {
    let store = common::setup_store();

    for len in [DEFAULT_SECRET_LENGTH + 1, 10033, 20000] {
        let payload = "a".repeat(len);
        assert_eq!(
            store.store(payload.as_bytes()),
            Err(SecretStoreError::InvalidInput {
                len,
                max: DEFAULT_SECRET_LENGTH
            })
        );
    }
    assert!(store.is_empty());
}

#[test]
fn test_every_token_has_fixed_length() {
    let store = common::setup_store();
    assert_eq!(store.token_length(), 1376);

    let long = "y".repeat(500);
    let full = "z".repeat(DEFAULT_SECRET_LENGTH);
    for payload in ["", "x", long.as_str(), full.as_str()] {
        let token = common::store_str(&store, payload);
        assert_eq!(token.as_str().len(), 1376);
        assert!(token
            .as_str()
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
    }
}

#[test]
fn test_custom_secret_length() {
    let store = common::setup_store_with(64, None);
    assert_eq!(store.secret_length(), 64);

    let token = common::store_str(&store, &"b".repeat(64));
    assert_eq!(token.as_str().len(), store.token_length());
    assert_eq!(store.redeem(token.as_str()).unwrap(), "b".repeat(64).as_bytes());
    assert!(matches!(
        store.store(&[1u8; 65]),
        Err(SecretStoreError::InvalidInput { len: 65, max: 64 })
    ));
}
