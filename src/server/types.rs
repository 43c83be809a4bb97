use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn alive() -> Self {
        Self {
            status: "alive".to_string(),
        }
    }
}
