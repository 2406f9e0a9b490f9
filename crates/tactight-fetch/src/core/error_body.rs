use serde_json::Value;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Keys checked in order: our own `message`, the generator's `detail`,
/// then the gateway's `error`.
const MESSAGE_KEYS: [&str; 3] = ["message", "detail", "error"];

/// Extract a human-readable message from an error response body.
///
/// Structured JSON bodies are preferred; anything else is returned as text.
/// A JSON object without a usable message key yields "Unknown error".
pub fn error_message(body: &[u8]) -> String {
    if let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) {
        for key in MESSAGE_KEYS {
            match fields.get(key) {
                Some(Value::String(message)) if !message.trim().is_empty() => return message.trim().to_string(),
                Some(Value::Null) | Some(Value::String(_)) | None => continue,
                Some(other) => return other.to_string(),
            }
        }
        return UNKNOWN_ERROR.to_string();
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        text.to_string()
    }
}
