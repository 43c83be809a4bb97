use thiserror::Error;

/// One landmark: x, y, score and whatever else the detector emits.
pub type Keypoint = Vec<f64>;

/// All poses detected in one image, in detector order.
pub type PoseResult = Vec<Vec<Keypoint>>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("image payload is not valid base64: {0}")]
    InvalidImage(String),

    #[error("pose detection failed: {0}")]
    Failed(String),

    #[error("detector returned no poses")]
    NoPoses,
}

impl InferenceError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }

    /// Client-facing message. The cause stays in the operational log.
    pub fn client_message(&self) -> &'static str {
        match self {
            Self::InvalidImage(_) | Self::Failed(_) => "Inference failed",
            Self::NoPoses => "No poses detected",
        }
    }
}

/// Total number of keypoints across every pose.
pub fn keypoint_count(poses: &PoseResult) -> usize {
    poses.iter().map(Vec::len).sum()
}
