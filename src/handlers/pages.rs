use axum::{http::Uri, response::IntoResponse, Json};
use serde_json::json;

use crate::api::envelope;

/// Shell reply for the gated page routes. Presentation lives in the browser
/// bundle; the gateway only confirms which page the session reached.
pub async fn shell(uri: Uri) -> impl IntoResponse {
    Json(envelope::success(json!({ "page": uri.path() })))
}
