use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::envelope;
use crate::error::ApiError;
use crate::session::{self, Session, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::startup::AppState;

const LOGIN_PATH: &str = "/auth/login";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /login - exchange credentials for a cookie-backed session.
///
/// Credentials are forwarded to the platform API; the token pair from its
/// reply lands in the `access-token` / `refresh-token` cookies and never
/// reaches the browser script. Backend rejections relay with their upstream
/// status.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(credentials): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let body = json!({
        "email": credentials.email,
        "password": credentials.password,
    });

    let reply = state
        .backend
        .post(LOGIN_PATH, Some(&body), &Session::anonymous())
        .await?;

    let access = token_from(&reply, "access_token")?;
    let refresh = token_from(&reply, "refresh_token")?;

    let jar = jar
        .add(session::access_cookie(access))
        .add(session::refresh_cookie(refresh));

    tracing::info!("session established");

    Ok((jar, Json(envelope::success(json!({ "authenticated": true })))))
}

/// POST /logout - drop both token cookies. No backend call; the tokens are
/// opaque here and expire upstream on their own.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let jar = jar
        .add(session::removal_cookie(ACCESS_TOKEN_COOKIE))
        .add(session::removal_cookie(REFRESH_TOKEN_COOKIE));

    (
        jar,
        Json(envelope::success(json!({ "authenticated": false }))),
    )
}

fn token_from<'a>(reply: &'a Value, field: &str) -> Result<&'a str, ApiError> {
    reply
        .pointer(&format!("/data/{field}"))
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::upstream(502, format!("auth reply missing {field}")))
}
