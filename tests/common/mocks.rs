use async_trait::async_trait;
use cloudpose::inference::{InferenceError, PoseDetector, PoseResult};
use std::sync::{Arc, Mutex};

/// Mock pose detector for testing
#[derive(Debug)]
pub struct MockPoseDetector {
    pub result: Result<PoseResult, InferenceError>,
    pub images: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockPoseDetector {
    pub fn returning(poses: PoseResult) -> Self {
        Self {
            result: Ok(poses),
            images: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: InferenceError) -> Self {
        Self {
            result: Err(error),
            images: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.images.lock().unwrap().len()
    }

    pub fn received_images(&self) -> Vec<Vec<u8>> {
        self.images.lock().unwrap().clone()
    }
}

#[async_trait]
impl PoseDetector for MockPoseDetector {
    async fn detect(&self, image: &[u8]) -> Result<PoseResult, InferenceError> {
        self.images.lock().unwrap().push(image.to_vec());
        self.result.clone()
    }
}
