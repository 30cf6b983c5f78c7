use axum::routing::post;
use axum::Router;

use crate::ServiceState;

pub mod create;
pub mod redeem;

// Re-export for convenience
pub use create::{CreateRequest, CreateResponse};
pub use redeem::{RedeemRequest, RedeemResponse};

/// Body returned for any token that can not be redeemed
pub const SECRET_MISSING_MSG: &str = "secret does not exist or it was already read";

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", post(create::handler))
        .route("/redeem", post(redeem::handler))
        .with_state(state)
}
