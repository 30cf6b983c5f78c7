use axum::extract::{Extension, Json, State};
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

use common::prelude::{SecretStoreError, Token};

use crate::http_server::api::client::ApiRequest;
use crate::http_server::{Config, ConfigError};
use crate::ServiceState;

#[derive(Clone, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Base64-encoded secret content
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateResponse {
    /// Token that redeems the secret exactly once
    pub token: Token,
    /// Share link for the HTML reveal page
    pub url: Url,
}

pub async fn handler(
    State(state): State<ServiceState>,
    Extension(config): Extension<Config>,
    Json(req): Json<CreateRequest>,
) -> Result<impl IntoResponse, CreateError> {
    let content = STANDARD.decode(&req.content)?;
    let token = state.secrets().store(&content)?;
    let url = config.share_url(&token)?;

    tracing::info!(size = content.len(), "CREATE SECRET: stored secret");
    Ok((
        http::StatusCode::CREATED,
        Json(CreateResponse { token, url }),
    )
        .into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("Invalid base64 content: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Store error: {0}")]
    Store(#[from] SecretStoreError),
    #[error("Share link error: {0}")]
    ShareUrl(#[from] ConfigError),
}

impl IntoResponse for CreateError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            CreateError::Base64(e) => {
                tracing::warn!("rejected secret with invalid base64: {}", e);
                (
                    http::StatusCode::BAD_REQUEST,
                    format!("invalid base64 content: {}", e),
                )
            }
            CreateError::Store(SecretStoreError::InvalidInput { len, max }) => {
                tracing::warn!(len, max, "rejected secret over the size limit");
                (
                    http::StatusCode::BAD_REQUEST,
                    format!("payload exceeds {} bytes", max),
                )
            }
            e @ (CreateError::Store(_) | CreateError::ShareUrl(_)) => {
                tracing::error!("CREATE SECRET ERROR: {}", e);
                (
                    http::StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to store secret".to_string(),
                )
            }
        };
        (status, Json(serde_json::json!({ "msg": msg }))).into_response()
    }
}

// Client implementation - builds request for this operation
impl ApiRequest for CreateRequest {
    type Response = CreateResponse;

    fn build_request(
        self,
        base_url: &Url,
        client: &Client,
    ) -> Result<RequestBuilder, url::ParseError> {
        let full_url = base_url.join("/api/v0/secret")?;
        Ok(client.post(full_url).json(&self))
    }
}
