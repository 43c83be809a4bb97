use crate::predict::PredictResponse;
use chrono::{DateTime, Local};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One successful response as it lands in the response log.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub timestamp: DateTime<Local>,
    pub response: PredictResponse,
}

impl LogRecord {
    pub fn new(response: PredictResponse) -> Self {
        Self {
            timestamp: Local::now(),
            response,
        }
    }

    /// `<timestamp> - RESPONSE - <json>` terminated by a newline.
    pub fn to_line(&self) -> serde_json::Result<String> {
        let payload = serde_json::to_string(&self.response)?;
        Ok(format!(
            "{} - RESPONSE - {}\n",
            self.timestamp.format(TIMESTAMP_FORMAT),
            payload
        ))
    }
}
