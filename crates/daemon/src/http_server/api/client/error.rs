use reqwest::StatusCode;
use serde::Deserialize;

/// Body of every non-2xx JSON response from `/api/v0`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub msg: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to daemon failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid daemon URL: {0}")]
    UrlParse(#[from] url::ParseError),
    /// The daemon answered with an error message
    #[error("daemon returned {status}: {msg}")]
    Rejected { status: StatusCode, msg: String },
}

impl ApiError {
    /// Build the error for a non-success response from its status and raw body
    ///
    /// Falls back to the raw body when it is not the `{"msg": ...}` shape.
    pub fn from_response_body(status: StatusCode, body: &str) -> Self {
        let msg = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody { msg }) => msg,
            Err(_) if body.trim().is_empty() => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
            Err(_) => body.trim().to_string(),
        };
        ApiError::Rejected { status, msg }
    }

    /// Whether the daemon reported the secret as missing or already read
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Rejected { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}
