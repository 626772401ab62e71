use axum::{
    extract::Request,
    http::{header::SET_COOKIE, HeaderValue},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::session::{self, Session, ACCESS_TOKEN_COOKIE};

/// Session ingress/egress middleware.
///
/// Extracts the `Session` from the cookie jar and injects it into request
/// extensions so handlers and the outbound client receive credentials
/// explicitly. After the inner service completes, a downstream 401 (flagged
/// via `Session::invalidate`) is turned into an access token removal cookie.
pub async fn session_middleware(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let session = Session::from_jar(&jar);
    request.extensions_mut().insert(session.clone());

    let mut response = next.run(request).await;

    if session.is_invalidated() {
        tracing::debug!("session invalidated downstream, clearing access token cookie");
        let removal = session::removal_cookie(ACCESS_TOKEN_COOKIE);
        if let Ok(value) = HeaderValue::from_str(&removal.to_string()) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}
