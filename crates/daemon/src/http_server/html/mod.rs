use axum::routing::{get, post};
use axum::Router;

mod create;
mod decrypt_secret;
mod get_secret;
mod index;

use crate::ServiceState;

/// Form field carrying the token on the reveal page
pub const TOKEN_FORM_FIELD: &str = "base64MapKey";

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(index::handler))
        .route("/create", post(create::handler))
        .route("/get-secret/*secret", get(get_secret::handler))
        .route("/decrypt-secret", post(decrypt_secret::handler))
        .with_state(state)
}
