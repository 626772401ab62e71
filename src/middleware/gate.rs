use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use serde_json::Value;

use crate::client::ClientError;
use crate::session::Session;
use crate::startup::AppState;

/// Backend endpoint reporting the calling company's activation state
pub const ACTIVATION_STATUS_PATH: &str = "/company/activation-status";

/// Activation gate over the protected page routes.
///
/// Unauthenticated sessions go to /login. Authenticated sessions are checked
/// against the company activation status: `pending` and `onboarding`
/// companies are sent to their respective flows, anything else passes
/// through. Every upstream failure fails closed to /login — an
/// unauthenticated redirect is recoverable, a wrongly admitted session is
/// not.
pub async fn activation_gate(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    request: Request,
    next: Next,
) -> Response {
    if !session.is_authenticated() {
        return Redirect::temporary("/login").into_response();
    }

    match state
        .backend
        .get(ACTIVATION_STATUS_PATH, None, &session)
        .await
    {
        Ok(reply) => {
            let status = reply
                .pointer("/data/activation_status")
                .and_then(Value::as_str)
                .unwrap_or_default();
            match status {
                "pending" => Redirect::temporary("/activation-status").into_response(),
                "onboarding" => Redirect::temporary("/onboarding").into_response(),
                _ => next.run(request).await,
            }
        }
        Err(ClientError::Domain { status, message, .. }) => {
            tracing::warn!(status, "activation status check rejected: {}", message);
            Redirect::temporary("/login").into_response()
        }
        Err(ClientError::Transport(message)) => {
            tracing::warn!("activation status check unreachable: {}", message);
            Redirect::temporary("/login").into_response()
        }
    }
}
