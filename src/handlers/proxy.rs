use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::client::ProxyMethod;
use crate::error::ApiError;
use crate::session::Session;
use crate::startup::AppState;

/// One backend API instruction, as submitted by the browser client
#[derive(Debug, Deserialize)]
pub struct ProxyInstruction {
    pub url: String,
    pub method: String,
    pub data: Option<Value>,
    pub params: Option<Value>,
}

/// POST /api/generic - execute one platform API instruction on behalf of
/// the browser client.
///
/// The instruction names an internal API path, a method (get/post/put/
/// delete), and optional body/query payloads. Success envelopes relay
/// verbatim with HTTP 200; backend domain errors relay as
/// `{error, details}` with the upstream status; transport failures become
/// a generic 500. Unknown methods are answered with 400 rather than
/// dropped.
pub async fn forward(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(instruction): Json<ProxyInstruction>,
) -> Result<impl IntoResponse, ApiError> {
    let method = ProxyMethod::parse(&instruction.method).ok_or_else(|| {
        ApiError::bad_request(format!(
            "unsupported method '{}': expected one of get, post, put, delete",
            instruction.method
        ))
    })?;

    tracing::debug!(method = %instruction.method, url = %instruction.url, "forwarding API instruction");

    let reply = state
        .backend
        .request(
            method,
            &instruction.url,
            instruction.params.as_ref(),
            instruction.data.as_ref(),
            &session,
        )
        .await?;

    Ok((StatusCode::OK, Json(reply)))
}
