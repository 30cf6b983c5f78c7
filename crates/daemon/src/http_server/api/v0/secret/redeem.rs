use axum::extract::{Json, State};
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

use common::prelude::{SecretStoreError, Token};

use super::SECRET_MISSING_MSG;
use crate::http_server::api::client::ApiRequest;
use crate::ServiceState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedeemRequest {
    pub token: Token,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct RedeemResponse {
    /// Base64-encoded secret content
    pub content: String,
    pub size: usize,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Json(req): Json<RedeemRequest>,
) -> Result<impl IntoResponse, RedeemError> {
    let content = state.secrets().redeem(req.token.as_str())?;

    tracing::info!(size = content.len(), "REDEEM SECRET: secret redeemed");
    Ok((
        http::StatusCode::OK,
        Json(RedeemResponse {
            content: STANDARD.encode(&content),
            size: content.len(),
        }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum RedeemError {
    #[error("Store error: {0}")]
    Store(#[from] SecretStoreError),
}

impl IntoResponse for RedeemError {
    fn into_response(self) -> Response {
        match self {
            // Unknown, consumed, expired and malformed tokens all look the same
            RedeemError::Store(SecretStoreError::NotFound | SecretStoreError::InvalidToken) => {
                tracing::warn!("REDEEM SECRET: no secret for presented token");
                (
                    http::StatusCode::NOT_FOUND,
                    Json(serde_json::json!({ "msg": SECRET_MISSING_MSG })),
                )
                    .into_response()
            }
            RedeemError::Store(e) => {
                tracing::error!("REDEEM SECRET ERROR: {:?}", e);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "msg": "failed to redeem secret" })),
                )
                    .into_response()
            }
        }
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for RedeemRequest {
    type Response = RedeemResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/secret/redeem")?;
        Ok(client.post(full_url).json(&self))
    }
}
