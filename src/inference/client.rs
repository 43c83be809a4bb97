use super::types::*;
use crate::{Result, config::InferenceConfig};
use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

/// Boundary to the external pose-detection capability.
///
/// Implementations are shared between concurrent requests. One that wraps a
/// model which is not safe for concurrent use has to serialize access itself.
#[async_trait]
pub trait PoseDetector: Send + Sync {
    async fn detect(&self, image: &[u8]) -> std::result::Result<PoseResult, InferenceError>;
}

/// Forwards raw image bytes to a pose-detection service over HTTP.
///
/// The service answers with a JSON nested array `[[[x, y, score], ...], ...]`,
/// or `null` when it found nothing.
pub struct HttpPoseDetector {
    client: Client,
    url: String,
}

impl HttpPoseDetector {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl PoseDetector for HttpPoseDetector {
    async fn detect(&self, image: &[u8]) -> std::result::Result<PoseResult, InferenceError> {
        debug!("Sending {} image bytes to {}", image.len(), self.url);

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .map_err(|e| InferenceError::failed(format!("request to detector failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InferenceError::failed(format!(
                "detector responded with status {status}"
            )));
        }

        let poses: Option<PoseResult> = response
            .json()
            .await
            .map_err(|e| InferenceError::failed(format!("unreadable detector output: {e}")))?;

        match poses {
            Some(poses) if !poses.is_empty() => {
                debug!("Detector returned {} poses", poses.len());
                Ok(poses)
            }
            _ => Err(InferenceError::NoPoses),
        }
    }
}
