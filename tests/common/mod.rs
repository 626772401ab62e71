// Each integration binary pulls in only the pieces of the harness it needs
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use guardpost::api::envelope;

/// Mutable knobs of the stub platform API, shared with the test body
#[derive(Debug)]
pub struct StubState {
    pub activation_status: String,
    pub fail_activation: bool,
    pub activation_calls: usize,
}

pub type SharedStub = Arc<Mutex<StubState>>;

/// One stub backend plus one gateway wired to it, both on ephemeral ports
pub struct TestContext {
    pub gateway_url: String,
    pub backend_url: String,
    pub stub: SharedStub,
    pub client: reqwest::Client,
}

impl TestContext {
    pub async fn spawn() -> Result<Self> {
        let stub = Arc::new(Mutex::new(StubState {
            activation_status: "active".to_string(),
            fail_activation: false,
            activation_calls: 0,
        }));

        let backend_addr = serve(stub_router(stub.clone())).await?;
        let backend_url = format!("http://{}", backend_addr);
        let gateway = guardpost::startup::app(&backend_url)?;
        let gateway_addr = serve(gateway).await?;

        Ok(Self {
            gateway_url: format!("http://{}", gateway_addr),
            backend_url,
            stub,
            client: redirectless_client()?,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.gateway_url, path)
    }

    pub fn set_activation(&self, status: &str) {
        self.stub.lock().unwrap().activation_status = status.to_string();
    }

    pub fn fail_activation(&self) {
        self.stub.lock().unwrap().fail_activation = true;
    }
}

/// Gateway wired to an arbitrary (possibly unreachable) backend URL
pub async fn spawn_gateway_with_backend(backend_url: &str) -> Result<(String, reqwest::Client)> {
    let gateway = guardpost::startup::app(backend_url)?;
    let addr = serve(gateway).await?;
    Ok((format!("http://{}", addr), redirectless_client()?))
}

/// Redirects stay observable so the route gate's replies can be asserted
fn redirectless_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .context("failed to build test client")
}

pub fn session_cookie(token: &str) -> String {
    format!("access-token={}", token)
}

async fn serve(app: Router) -> Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

fn stub_router(stub: SharedStub) -> Router {
    Router::new()
        .route("/health", get(stub_health))
        .route("/auth/login", post(stub_login))
        .route("/company/activation-status", get(stub_activation))
        .route("/guards", get(stub_guards))
        .route("/echo", post(stub_echo))
        .route("/private", get(stub_private))
        .route("/missing", get(stub_missing))
        .route("/garbled", get(stub_garbled))
        .with_state(stub)
}

async fn stub_health() -> impl IntoResponse {
    Json(envelope::success(json!({ "status": "ok" })))
}

async fn stub_login(Json(body): Json<Value>) -> impl IntoResponse {
    if body.get("password").and_then(Value::as_str) == Some("wrong") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(envelope::error(
                "INVALID_CREDENTIALS",
                "Invalid credentials",
                None,
            )),
        );
    }

    (
        StatusCode::OK,
        Json(envelope::success(json!({
            "access_token": "acc-1",
            "refresh_token": "ref-1",
        }))),
    )
}

async fn stub_activation(State(stub): State<SharedStub>) -> impl IntoResponse {
    let (status, fail) = {
        let mut stub = stub.lock().unwrap();
        stub.activation_calls += 1;
        (stub.activation_status.clone(), stub.fail_activation)
    };

    if fail {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(envelope::error(
                "INTERNAL_ERROR",
                "activation lookup failed",
                None,
            )),
        );
    }

    (
        StatusCode::OK,
        Json(envelope::success(json!({ "activation_status": status }))),
    )
}

async fn stub_guards() -> impl IntoResponse {
    Json(envelope::success_list(
        vec![
            json!({"id": "g-1", "name": "R. Vance", "license": "TX-1042"}),
            json!({"id": "g-2", "name": "M. Osei", "license": "TX-2210"}),
        ],
        45,
    ))
}

async fn stub_echo(Json(body): Json<Value>) -> impl IntoResponse {
    Json(envelope::success(json!({ "received": body })))
}

async fn stub_private(headers: HeaderMap) -> impl IntoResponse {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "Bearer acc-1")
        .unwrap_or(false);

    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(envelope::error("UNAUTHORIZED", "token expired", None)),
        );
    }

    (
        StatusCode::OK,
        Json(envelope::success(json!({ "secret": "clearance-granted" }))),
    )
}

async fn stub_missing() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(envelope::error(
            "NOT_FOUND",
            "Not found",
            Some(json!({ "resource": "license" })),
        )),
    )
}

async fn stub_garbled() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], "not json")
}
