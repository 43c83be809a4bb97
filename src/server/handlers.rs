use super::types::HealthResponse;
use crate::predict::{PredictResponse, PredictionHandler};
use axum::{
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub predictor: PredictionHandler,
}

pub async fn health_check() -> Json<HealthResponse> {
    info!("Health check endpoint called");
    Json(HealthResponse::alive())
}

/// Takes the body as raw bytes so that malformed and double-encoded JSON is
/// classified by the decoder rather than rejected by an extractor. A body
/// that cannot be read at all still gets a JSON error.
pub async fn predict(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<PredictResponse>) {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            error!("Failed to read request body: {}", rejection.body_text());
            let status = rejection.status();
            let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
                "Payload too large"
            } else {
                "Invalid JSON"
            };
            return (status, Json(PredictResponse::failure(None, message)));
        }
    };

    let (status, response) = state.predictor.handle(&body).await;
    (status, Json(response))
}
