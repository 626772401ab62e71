use serde_json::Value;
use thiserror::Error;

/// Outcome of a backend call, tagged so callers can tell expected domain
/// errors (the backend answered with an error envelope) from transport
/// failures (network errors, malformed replies) without runtime type checks.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{message}")]
    Domain {
        status: u16,
        code: String,
        message: String,
        details: Option<Value>,
    },

    #[error("{0}")]
    Transport(String),
}

impl ClientError {
    pub fn is_domain(&self) -> bool {
        matches!(self, ClientError::Domain { .. })
    }
}
