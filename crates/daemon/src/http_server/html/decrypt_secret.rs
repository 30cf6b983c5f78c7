use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Form, State};
use axum::response::Response;
use http::StatusCode;
use serde::Deserialize;
use tracing::instrument;

use common::prelude::SecretStoreError;

use crate::ServiceState;

#[derive(Deserialize)]
pub struct DecryptForm {
    #[serde(rename = "base64MapKey", default)]
    pub token: String,
}

#[derive(Template)]
#[template(path = "show_secret.html")]
struct ShowSecretTemplate {
    secret: String,
}

#[derive(Template)]
#[template(path = "secret_missing.html")]
struct SecretMissingTemplate {}

#[instrument(skip_all)]
pub async fn handler(
    State(state): State<ServiceState>,
    Form(form): Form<DecryptForm>,
) -> Result<Response, DecryptError> {
    let token = form.token.trim();
    if token.is_empty() {
        return Err(DecryptError::MissingToken);
    }

    let secret = state.secrets().redeem(token)?;
    tracing::info!(size = secret.len(), "secret redeemed");

    let template = ShowSecretTemplate {
        secret: String::from_utf8_lossy(&secret).into_owned(),
    };
    Ok((StatusCode::OK, template).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum DecryptError {
    #[error("no token provided")]
    MissingToken,
    #[error("redeem failed: {0}")]
    Redeem(#[from] SecretStoreError),
}

impl IntoResponse for DecryptError {
    fn into_response(self) -> Response {
        tracing::warn!("DECRYPT SECRET ERROR: {}", self);
        match self {
            DecryptError::MissingToken => {
                (StatusCode::BAD_REQUEST, "no secret provided").into_response()
            }
            // Unknown, consumed, expired and malformed tokens all look the same
            DecryptError::Redeem(_) => {
                (StatusCode::BAD_REQUEST, SecretMissingTemplate {}).into_response()
            }
        }
    }
}
