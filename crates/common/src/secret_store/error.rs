use crate::crypto::PadError;

/// Errors returned by [`SecretStore`](super::SecretStore) operations
///
/// None of these leave a trace in the store: every failure happens before
/// mutation, or is the observation that nothing is there to mutate.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum SecretStoreError {
    /// The payload is longer than the configured secret length
    #[error("payload of {len} bytes exceeds the maximum of {max} bytes")]
    InvalidInput { len: usize, max: usize },
    /// The entropy source could not produce a pad
    #[error("random source failure: {0}")]
    RandomSourceFailure(String),
    /// The token is not a strict base64url encoding of a pad
    #[error("invalid token")]
    InvalidToken,
    /// No live secret matches the token
    ///  (never stored, already redeemed, or expired)
    #[error("secret not found")]
    NotFound,
}

impl From<PadError> for SecretStoreError {
    fn from(err: PadError) -> Self {
        match err {
            PadError::RandomSource(msg) => SecretStoreError::RandomSourceFailure(msg),
            PadError::Encoding(_)
            | PadError::InvalidTokenLength { .. }
            | PadError::InvalidLength { .. }
            | PadError::LengthMismatch { .. } => SecretStoreError::InvalidToken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_source_failure_keeps_cause() {
        let err = SecretStoreError::from(PadError::RandomSource("entropy exhausted".into()));
        assert_eq!(
            err,
            SecretStoreError::RandomSourceFailure("entropy exhausted".to_string())
        );
        assert_eq!(err.to_string(), "random source failure: entropy exhausted");
    }

    #[test]
    fn test_decode_failures_become_invalid_token() {
        let failures = [
            PadError::Encoding(base64::DecodeError::InvalidPadding),
            PadError::InvalidTokenLength {
                expected: 1376,
                got: 1377,
            },
            PadError::InvalidLength {
                expected: 1032,
                got: 1031,
            },
            PadError::LengthMismatch {
                pad: 1032,
                data: 16,
            },
        ];

        for failure in failures {
            assert_eq!(
                SecretStoreError::from(failure),
                SecretStoreError::InvalidToken
            );
        }
    }
}
