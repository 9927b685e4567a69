//! Executes `HttpRequest` values over the network.
//!
//! `Transport` is the seam between the pure client and real I/O. The bundled
//! `ReqwestTransport` adds the bearer token, logs each call, and hands back
//! every response as data, non-2xx included; status interpretation stays in
//! `ResourceClient::parse_*`.

use std::future::Future;

use reqwest::{Client, Method};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Maximum number of characters of a response body written to the log.
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Something that can perform one HTTP round-trip.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = ApiResult<HttpResponse>> + Send;
}

/// Truncate a body and strip control characters before logging it.
fn sanitize_for_log(body: &str) -> String {
    let total = body.chars().count();
    let mut out: String = body
        .chars()
        .take(MAX_LOG_BODY_LENGTH)
        .filter(|c| !c.is_control())
        .collect();
    if total > MAX_LOG_BODY_LENGTH {
        out.push_str(&format!("... [truncated, {} bytes total]", body.len()));
    }
    out
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// `Transport` backed by a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    token: Option<String>,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token: config.token.clone(),
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        tracing::debug!("{} {}", request.method, request.path);

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), request.path.as_str());
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to send request: {e}")))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            tracing::warn!("API error: {} - {}", status, sanitize_for_log(&body));
        }

        Ok(HttpResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}
