use super::types::{DEFAULT_REQUEST_ID, DecodeError, PredictRequest};
use serde_json::{Map, Value};
use tracing::info;

/// Turns a raw `/predict` body into a validated request.
///
/// A body whose top-level value is a JSON string is parsed once more, so
/// clients that serialize their payload twice are accepted. Only one level
/// is unwrapped. The image stays base64 text here; decoding it is part of
/// the inference step.
pub fn decode(raw_body: &[u8]) -> Result<PredictRequest, DecodeError> {
    let value: Value =
        serde_json::from_slice(raw_body).map_err(|e| DecodeError::malformed(e.to_string()))?;

    let fields = match value {
        Value::Object(fields) => fields,
        Value::String(inner) => {
            info!("Double-encoded JSON received, decoding inner string");
            match serde_json::from_str(&inner) {
                Ok(Value::Object(fields)) => fields,
                Ok(other) => {
                    return Err(DecodeError::malformed(format!(
                        "double-encoded payload holds {}, not an object",
                        kind_of(&other)
                    )));
                }
                Err(e) => return Err(DecodeError::malformed(e.to_string())),
            }
        }
        other => return Err(DecodeError::NotAnObject(kind_of(&other))),
    };

    let id = request_id(&fields);
    match fields.get("image") {
        Some(Value::String(image)) if !image.is_empty() => Ok(PredictRequest {
            id,
            image: image.clone(),
        }),
        _ => Err(DecodeError::MissingImage { id }),
    }
}

fn request_id(fields: &Map<String, Value>) -> String {
    match fields.get("id") {
        None | Some(Value::Null) => DEFAULT_REQUEST_ID.to_string(),
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
