pub mod error;

pub use error::ClientError;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::api::envelope;
use crate::session::Session;

/// The four instruction methods the platform API accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl ProxyMethod {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "get" => Some(ProxyMethod::Get),
            "post" => Some(ProxyMethod::Post),
            "put" => Some(ProxyMethod::Put),
            "delete" => Some(ProxyMethod::Delete),
            _ => None,
        }
    }

    fn as_reqwest(self) -> Method {
        match self {
            ProxyMethod::Get => Method::GET,
            ProxyMethod::Post => Method::POST,
            ProxyMethod::Put => Method::PUT,
            ProxyMethod::Delete => Method::DELETE,
        }
    }
}

/// Single point of outbound communication with the platform API.
///
/// Attaches the session's bearer token to every request, interprets replies
/// through the response envelope, and marks the session invalidated when the
/// backend answers 401. No retries, no inline token refresh.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("invalid backend base URL '{}': {}", base_url, e))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get(
        &self,
        path: &str,
        params: Option<&Value>,
        session: &Session,
    ) -> Result<Value, ClientError> {
        self.request(ProxyMethod::Get, path, params, None, session)
            .await
    }

    pub async fn post(
        &self,
        path: &str,
        body: Option<&Value>,
        session: &Session,
    ) -> Result<Value, ClientError> {
        self.request(ProxyMethod::Post, path, None, body, session)
            .await
    }

    pub async fn put(
        &self,
        path: &str,
        body: Option<&Value>,
        session: &Session,
    ) -> Result<Value, ClientError> {
        self.request(ProxyMethod::Put, path, None, body, session)
            .await
    }

    pub async fn delete(
        &self,
        path: &str,
        params: Option<&Value>,
        session: &Session,
    ) -> Result<Value, ClientError> {
        self.request(ProxyMethod::Delete, path, params, None, session)
            .await
    }

    /// Execute one backend call and interpret the reply envelope.
    pub async fn request(
        &self,
        method: ProxyMethod,
        path: &str,
        params: Option<&Value>,
        body: Option<&Value>,
        session: &Session,
    ) -> Result<Value, ClientError> {
        let url = self.url_for(path);

        let mut request = self.http.request(method.as_reqwest(), &url);
        if let Some(token) = session.access_token() {
            request = request.bearer_auth(token);
        }
        if let Some(params) = params {
            request = request.query(&query_pairs(params));
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("request to {} failed: {}", url, e);
            ClientError::Transport(format!("request to backend failed: {e}"))
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            // stored access token is no longer honoured upstream; the next
            // navigation through the route gate sends the user to /login
            session.invalidate();
        }

        let text = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("failed to read backend reply: {e}")))?;
        let reply: Value = serde_json::from_str(&text)
            .map_err(|e| ClientError::Transport(format!("malformed JSON from backend: {e}")))?;

        if envelope::is_error(&reply) {
            // 2xx with an error envelope is a broken upstream contract
            let status_code = if status.is_success() { 502 } else { status.as_u16() };
            return Err(match envelope::parse_error(&reply) {
                Some(err) => ClientError::Domain {
                    status: status_code,
                    code: err.code,
                    message: err.message,
                    details: err.details,
                },
                None => ClientError::Domain {
                    status: status_code,
                    code: "UPSTREAM_ERROR".to_string(),
                    message: format!("backend replied {status}"),
                    details: None,
                },
            });
        }

        if !status.is_success() {
            return Err(ClientError::Transport(format!(
                "backend replied {status} without an error envelope"
            )));
        }

        Ok(reply)
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

/// Render a JSON params object as query pairs. Scalars serialize verbatim;
/// structured values (e.g. the list filter object) travel as JSON text.
fn query_pairs(params: &Value) -> Vec<(String, String)> {
    let Some(map) = params.as_object() else {
        return Vec::new();
    };

    map.iter()
        .map(|(k, v)| {
            let rendered = match v {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (k.clone(), rendered)
        })
        .collect()
}
