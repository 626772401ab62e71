// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::client::ClientError;

/// Gateway error with appropriate status codes and client-friendly messages.
/// Replies use the proxy error shape: `{error, details?}`.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // Relayed backend domain error, status code taken from upstream
    Upstream {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    // 500 Internal Server Error; the original message travels in details
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::Upstream { status, .. } => *status,
            ApiError::Internal(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Upstream { message, .. } => message,
            ApiError::Internal(_) => "Internal Server Error",
        }
    }

    /// Convert to the `{error, details?}` JSON reply body
    pub fn to_json(&self) -> Value {
        let mut body = json!({ "error": self.message() });
        match self {
            ApiError::Upstream {
                details: Some(details),
                ..
            } => {
                body["details"] = details.clone();
            }
            ApiError::Internal(details) => {
                body["details"] = json!(details);
            }
            _ => {}
        }
        body
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        ApiError::Upstream {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

// Backend call failures map onto gateway replies: domain errors relay the
// upstream status and message, transport errors become a generic 500 with
// the real cause in details
impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Domain {
                status,
                message,
                details,
                ..
            } => ApiError::Upstream {
                status,
                message,
                details,
            },
            ClientError::Transport(message) => {
                tracing::error!("backend transport failure: {}", message);
                ApiError::Internal(message)
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_relays_upstream_status_and_details() {
        let err: ApiError = ClientError::Domain {
            status: 404,
            code: "NOT_FOUND".into(),
            message: "Not found".into(),
            details: Some(json!({"id": "g-17"})),
        }
        .into();

        assert_eq!(err.status_code(), 404);
        assert_eq!(
            err.to_json(),
            json!({"error": "Not found", "details": {"id": "g-17"}})
        );
    }

    #[test]
    fn transport_error_becomes_generic_500() {
        let err: ApiError = ClientError::Transport("boom".into()).into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.to_json(),
            json!({"error": "Internal Server Error", "details": "boom"})
        );
    }

    #[test]
    fn bad_request_has_no_details() {
        let err = ApiError::bad_request("unsupported method 'patch'");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_json(), json!({"error": "unsupported method 'patch'"}));
    }
}
