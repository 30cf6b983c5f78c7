//! Integration tests for storing and redeeming secrets

mod common;

use ::common::secret_store::SecretStoreError;

#[test]
fn test_round_trip() {
    let store = common::setup_store();

    let payloads = [
        "test1",
        "test2",
        "test3",
        "test4",
        "test5",
        "test6",
        "test7",
        "test8",
        "test9",
        "test10",
        "",
        "a much longer secret with spaces, punctuation! and numbers 1234567890",
        "line one\nline two\r\nline three",
        "emoji 🔐 and accents café",
    ];

    let tokens: Vec<_> = payloads
        .iter()
        .map(|payload| common::store_str(&store, payload))
        .collect();
    assert_eq!(store.len(), payloads.len());

    for (payload, token) in payloads.iter().zip(&tokens) {
        let redeemed = store.redeem(token.as_str()).unwrap();
        assert_eq!(String::from_utf8(redeemed).unwrap(), *payload);
    }
    assert!(store.is_empty());
}

#[test]
fn test_redeem_is_one_time() {
    let store = common::setup_store();
    let token = common::store_str(&store, "read me once");

    assert_eq!(store.redeem(token.as_str()).unwrap(), b"read me once");
    assert_eq!(store.redeem(token.as_str()), Err(SecretStoreError::NotFound));
    assert_eq!(store.redeem(token.as_str()), Err(SecretStoreError::NotFound));
}

#[test]
fn test_same_payload_gets_distinct_tokens() {
    let store = common::setup_store();
    let first = common::store_str(&store, "same");
    let second = common::store_str(&store, "same");

    assert_ne!(first, second);
    assert_eq!(store.len(), 2);
    assert_eq!(store.redeem(second.as_str()).unwrap(), b"same");
    assert_eq!(store.redeem(first.as_str()).unwrap(), b"same");
}

#[test]
fn test_binary_payload() {
    let store = common::setup_store();
    let payload: Vec<u8> = (1..=255).collect();
    let token = store.store(&payload).unwrap();
    assert_eq!(store.redeem(token.as_str()).unwrap(), payload);
}

#[test]
fn test_trailing_zero_bytes_are_stripped() {
    let store = common::setup_store();

    let token = store.store(b"abc\0\0").unwrap();
    assert_eq!(store.redeem(token.as_str()).unwrap(), b"abc");

    let token = store.store(&[0u8; 16]).unwrap();
    assert!(store.redeem(token.as_str()).unwrap().is_empty());

    // Interior zeros survive
    let token = store.store(b"a\0b").unwrap();
    assert_eq!(store.redeem(token.as_str()).unwrap(), b"a\0b");
}

#[test]
fn test_stores_are_independent() {
    let first = common::setup_store();
    let second = common::setup_store();
    let token = common::store_str(&first, "only in first");

    assert_eq!(second.redeem(token.as_str()), Err(SecretStoreError::NotFound));
    assert_eq!(first.redeem(token.as_str()).unwrap(), b"only in first");
}
