use super::mocks::MockPoseDetector;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use cloudpose::{
    config::ServerConfig, predict::PredictionHandler, response_log::ResponseLog, server,
};
use serde_json::Value;
use std::{path::PathBuf, sync::Arc};
use tempfile::TempDir;

/// 10x10 black PNG.
pub const BLACK_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x0a, 0x00, 0x00, 0x00, 0x0a, 0x08, 0x00, 0x00, 0x00, 0x00, 0xa8,
    0x59, 0x90, 0x61, 0x00, 0x00, 0x00, 0x0c, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x60,
    0xa0, 0x27, 0x00, 0x00, 0x00, 0x6e, 0x00, 0x01, 0x48, 0x5d, 0x7a, 0x63, 0x00, 0x00, 0x00,
    0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

pub fn black_png_base64() -> String {
    STANDARD.encode(BLACK_PNG)
}

/// Router wired to a mock detector and a response log in a temp dir
pub struct TestApp {
    pub router: Router,
    pub detector: Arc<MockPoseDetector>,
    pub responses: ResponseLog,
    pub log_path: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new(detector: MockPoseDetector) -> Self {
        Self::with_body_limit(detector, ServerConfig::default().max_body_bytes).await
    }

    pub async fn with_body_limit(detector: MockPoseDetector, max_body_bytes: usize) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let log_path = temp_dir.path().join("responses.log");
        let responses = ResponseLog::open(&log_path)
            .await
            .expect("Failed to open response log");

        let detector = Arc::new(detector);
        let router = server::router(
            PredictionHandler::new(detector.clone(), responses.clone()),
            max_body_bytes,
        );

        Self {
            router,
            detector,
            responses,
            log_path,
            _temp_dir: temp_dir,
        }
    }

    /// Lines currently in the response log, after flushing pending records
    pub async fn logged_lines(&self) -> Vec<String> {
        self.responses.flush().await;
        tokio::fs::read_to_string(&self.log_path)
            .await
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub fn predict_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
