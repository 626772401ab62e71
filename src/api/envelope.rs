use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

/// Error half of the response envelope: `{code, message, details?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Build a success envelope: `{ status, data, metadata: { timestamp } }`
pub fn success(data: Value) -> Value {
    json!({
        "status": STATUS_SUCCESS,
        "data": data,
        "metadata": { "timestamp": Utc::now().to_rfc3339() },
    })
}

/// Build a success envelope for a list page, carrying the total match count
/// in `metadata.count`
pub fn success_list(data: Vec<Value>, count: u64) -> Value {
    json!({
        "status": STATUS_SUCCESS,
        "data": data,
        "metadata": { "timestamp": Utc::now().to_rfc3339(), "count": count },
    })
}

/// Build an error envelope: `{ status, error: { code, message, details? },
/// metadata: { timestamp } }`
pub fn error(code: &str, message: &str, details: Option<Value>) -> Value {
    let mut err = Map::new();
    err.insert("code".into(), Value::String(code.to_string()));
    err.insert("message".into(), Value::String(message.to_string()));
    if let Some(details) = details {
        err.insert("details".into(), details);
    }

    json!({
        "status": STATUS_ERROR,
        "error": Value::Object(err),
        "metadata": { "timestamp": Utc::now().to_rfc3339() },
    })
}

/// True when the envelope's status tag reads "error"
pub fn is_error(envelope: &Value) -> bool {
    envelope.get("status").and_then(Value::as_str) == Some(STATUS_ERROR)
}

/// Extract the structured error body from an error envelope, if present and
/// well formed
pub fn parse_error(envelope: &Value) -> Option<ErrorBody> {
    if !is_error(envelope) {
        return None;
    }
    let err = envelope.get("error")?;
    Some(ErrorBody {
        code: err.get("code")?.as_str()?.to_string(),
        message: err.get("message")?.as_str()?.to_string(),
        details: err.get("details").cloned(),
    })
}

/// Total match count from `metadata.count` of a list reply
pub fn count(envelope: &Value) -> Option<u64> {
    envelope.pointer("/metadata/count").and_then(Value::as_u64)
}

/// The `data` payload of a success envelope
pub fn data(envelope: &Value) -> Option<&Value> {
    envelope.get("data")
}
