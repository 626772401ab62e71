use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::config;

pub const ACCESS_TOKEN_COOKIE: &str = "access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh-token";

/// Per-request session context, extracted once at ingress and passed
/// explicitly to everything that makes outbound calls.
///
/// Tokens are opaque strings minted by the platform API; the gateway never
/// inspects them. The invalidation flag is shared so the client wrapper can
/// signal a 401 to the session middleware, which clears the access token
/// cookie on the way out.
#[derive(Clone, Debug, Default)]
pub struct Session {
    access_token: Option<String>,
    invalidated: Arc<AtomicBool>,
}

impl Session {
    /// Session with no credentials, for unauthenticated outbound calls
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_jar(jar: &CookieJar) -> Self {
        Self {
            access_token: jar
                .get(ACCESS_TOKEN_COOKIE)
                .map(|c| c.value().to_string()),
            invalidated: Arc::default(),
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Absence of the access token means unauthenticated
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Mark the stored access token as no longer honoured upstream
    pub fn invalidate(&self) {
        self.invalidated.store(true, Ordering::Relaxed);
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated.load(Ordering::Relaxed)
    }
}

/// Access token cookie with its configured TTL
pub fn access_cookie(token: &str) -> Cookie<'static> {
    token_cookie(
        ACCESS_TOKEN_COOKIE,
        token,
        config::config().session.access_token_ttl_hours,
    )
}

/// Refresh token cookie with its configured TTL
pub fn refresh_cookie(token: &str) -> Cookie<'static> {
    token_cookie(
        REFRESH_TOKEN_COOKIE,
        token,
        config::config().session.refresh_token_ttl_hours,
    )
}

/// Cookie that deletes the named token: empty value, zero max-age
pub fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::ZERO)
        .build()
}

fn token_cookie(name: &'static str, value: &str, ttl_hours: i64) -> Cookie<'static> {
    Cookie::build((name, value.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(config::config().session.secure_cookies)
        .max_age(Duration::hours(ttl_hours))
        .build()
}
