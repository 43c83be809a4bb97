use super::{PredictRequest, PredictResponse, decode};
use crate::{
    inference::{InferenceError, PoseDetector, PoseResult, keypoint_count},
    response_log::ResponseLog,
};
use axum::http::StatusCode;
use base64::{Engine, engine::general_purpose::STANDARD};
use std::sync::Arc;
use tracing::{error, info};

/// Decode, infer, respond. Every outcome is a status plus a JSON body.
#[derive(Clone)]
pub struct PredictionHandler {
    detector: Arc<dyn PoseDetector>,
    responses: ResponseLog,
}

impl PredictionHandler {
    pub fn new(detector: Arc<dyn PoseDetector>, responses: ResponseLog) -> Self {
        Self {
            detector,
            responses,
        }
    }

    pub async fn handle(&self, raw_body: &[u8]) -> (StatusCode, PredictResponse) {
        let request = match decode(raw_body) {
            Ok(request) => request,
            Err(e) => {
                error!("Rejecting request: {}", e);
                let id = e.request_id().map(str::to_string);
                return (
                    StatusCode::BAD_REQUEST,
                    PredictResponse::failure(id, e.client_message()),
                );
            }
        };

        let keypoints = match self.infer(&request).await {
            Ok(keypoints) => keypoints,
            Err(e) => {
                error!("Inference error (request id={}): {}", request.id, e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    PredictResponse::failure(Some(request.id), e.client_message()),
                );
            }
        };

        info!(
            "Responding to request id={} with {} keypoints",
            request.id,
            keypoint_count(&keypoints)
        );

        let response = PredictResponse::success(request.id, keypoints);
        self.responses.record(&response);
        (StatusCode::OK, response)
    }

    async fn infer(&self, request: &PredictRequest) -> Result<PoseResult, InferenceError> {
        // Line-wrapped base64 (MIME, coreutils) is accepted; padding is not optional.
        let compact: Vec<u8> = request
            .image
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        let image = STANDARD
            .decode(&compact)
            .map_err(|e| InferenceError::InvalidImage(e.to_string()))?;

        let poses = self.detector.detect(&image).await?;
        if poses.is_empty() {
            return Err(InferenceError::NoPoses);
        }
        Ok(poses)
    }
}
