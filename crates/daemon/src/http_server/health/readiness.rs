use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::data_source::{DataSourceError, StateDataSource};

/// Ready until the shutdown signal has been sent
#[tracing::instrument]
pub async fn handler(data_src: StateDataSource) -> Result<Response, DataSourceError> {
    data_src.is_ready().await?;
    Ok((StatusCode::OK, Json(serde_json::json!({"status": "ok"}))).into_response())
}

impl IntoResponse for DataSourceError {
    fn into_response(self) -> Response {
        tracing::debug!("not ready: {}", self);
        let msg = match self {
            DataSourceError::ShuttingDown => "service is shutting down",
        };
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({"status": "failure", "message": msg})),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::to_bytes;

    use super::*;

    use crate::http_server::health::data_source::tests::*;

    async fn ready_response(mock: MockReadiness) -> Response {
        handler(StateDataSource::new(Arc::new(mock)))
            .await
            .into_response()
    }

    #[tokio::test]
    async fn test_ready_service() {
        let response = ready_response(MockReadiness::Ready).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_shutting_down_service() {
        let response = ready_response(MockReadiness::ShuttingDown).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "service is shutting down");
    }
}
