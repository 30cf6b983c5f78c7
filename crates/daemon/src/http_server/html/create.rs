use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::{Form, State};
use axum::response::Response;
use http::{header, StatusCode};
use serde::Deserialize;
use tracing::instrument;

use common::prelude::SecretStoreError;

use crate::http_server::share_path;
use crate::ServiceState;

#[derive(Deserialize)]
pub struct CreateForm {
    #[serde(rename = "secretValue", default)]
    pub secret_value: String,
}

#[derive(Template)]
#[template(path = "secret_too_long.html")]
struct SecretTooLongTemplate {
    len: usize,
    max: usize,
}

#[instrument(skip_all)]
pub async fn handler(
    State(state): State<ServiceState>,
    Form(form): Form<CreateForm>,
) -> Result<Response, CreateError> {
    let token = state.secrets().store(form.secret_value.as_bytes())?;
    tracing::info!(size = form.secret_value.len(), "secret stored");

    Ok((StatusCode::FOUND, [(header::LOCATION, share_path(&token))]).into_response())
}

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error("store error: {0}")]
    Store(#[from] SecretStoreError),
}

impl IntoResponse for CreateError {
    fn into_response(self) -> Response {
        match self {
            CreateError::Store(SecretStoreError::InvalidInput { len, max }) => {
                tracing::warn!(len, max, "rejected secret over the size limit");
                (StatusCode::BAD_REQUEST, SecretTooLongTemplate { len, max }).into_response()
            }
            CreateError::Store(e) => {
                tracing::error!("CREATE SECRET ERROR: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to store secret").into_response()
            }
        }
    }
}
