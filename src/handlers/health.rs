use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::api::envelope;
use crate::session::Session;
use crate::startup::AppState;

/// GET /health - gateway liveness plus reachability of the platform API
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state
        .backend
        .get("/health", None, &Session::anonymous())
        .await
    {
        Ok(_) => (
            StatusCode::OK,
            Json(envelope::success(json!({
                "status": "ok",
                "backend": "ok",
            }))),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(envelope::error(
                "BACKEND_UNAVAILABLE",
                "platform API unreachable",
                Some(json!({ "status": "degraded", "error": e.to_string() })),
            )),
        ),
    }
}
