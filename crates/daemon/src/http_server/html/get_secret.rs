use askama::Template;
use askama_axum::IntoResponse;
use axum::extract::Path;
use tracing::instrument;

use super::TOKEN_FORM_FIELD;

#[derive(Template)]
#[template(path = "get_secret.html")]
pub struct GetSecretTemplate {
    pub token: String,
    pub field_name: &'static str,
}

/// Landing page of a share link
///
/// Rendering this page does not touch the store, so link previews and
/// crawlers can not burn the secret; only the reveal form does.
#[instrument(skip_all)]
pub async fn handler(Path(secret): Path<String>) -> askama_axum::Response {
    let template = GetSecretTemplate {
        token: secret,
        field_name: TOKEN_FORM_FIELD,
    };

    template.into_response()
}
