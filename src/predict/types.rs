use crate::inference::PoseResult;
use serde::Serialize;
use thiserror::Error;

/// Id echoed back when the client did not send one.
pub const DEFAULT_REQUEST_ID: &str = "N/A";

/// A `/predict` body that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictRequest {
    pub id: String,
    /// Base64 text as the client sent it.
    pub image: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("missing image (request id={id})")]
    MissingImage { id: String },
}

impl DecodeError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedJson(msg.into())
    }

    /// Request id known at the point of failure, if any.
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::MissingImage { id } => Some(id),
            Self::MalformedJson(_) | Self::NotAnObject(_) => None,
        }
    }

    pub fn client_message(&self) -> &'static str {
        match self {
            Self::MalformedJson(_) | Self::NotAnObject(_) => "Invalid JSON",
            Self::MissingImage { .. } => "Missing image",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Success {
        id: String,
        keypoints: PoseResult,
    },
    Failure {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        error: String,
    },
}

impl PredictResponse {
    pub fn success(id: impl Into<String>, keypoints: PoseResult) -> Self {
        Self::Success {
            id: id.into(),
            keypoints,
        }
    }

    pub fn failure(id: Option<String>, error: impl Into<String>) -> Self {
        Self::Failure {
            id,
            error: error.into(),
        }
    }
}
