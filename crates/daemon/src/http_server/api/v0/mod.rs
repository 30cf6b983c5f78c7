use axum::Router;

pub mod secret;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .nest("/secret", secret::router(state.clone()))
        .with_state(state)
}
