use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::client::BackendClient;
use crate::config;
use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
}

/// Build the gateway router against the given platform API base URL.
///
/// The session middleware wraps everything so every handler sees an explicit
/// `Session`; the activation gate wraps only the protected page routes.
pub fn app(backend_url: &str) -> anyhow::Result<Router> {
    let backend =
        BackendClient::new(backend_url).context("failed to construct backend client")?;
    let state = AppState {
        backend: Arc::new(backend),
    };

    let protected = Router::new()
        .route("/dashboard", get(handlers::pages::shell))
        .route("/settings", get(handlers::pages::shell))
        .route("/settings/*path", get(handlers::pages::shell))
        .route("/guards", get(handlers::pages::shell))
        .route("/guards/*path", get(handlers::pages::shell))
        .route("/search-license", get(handlers::pages::shell))
        .route("/search-results", get(handlers::pages::shell))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::activation_gate,
        ));

    let router = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/api/generic", post(handlers::proxy::forward))
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer())
                .layer(axum::middleware::from_fn(
                    crate::middleware::session_middleware,
                )),
        )
        .with_state(state);

    Ok(router)
}

fn cors_layer() -> CorsLayer {
    let cfg = &config::config().api;
    if !cfg.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = cfg
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
