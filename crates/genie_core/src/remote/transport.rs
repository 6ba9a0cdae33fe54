//! HTTP round-trip execution.
//!
//! # Invariants
//! - 4xx/5xx responses are returned as data; only failures that produce no
//!   response become `ApiError::Transport`.
//! - No retries; timeouts are the transport defaults.
//! - Request headers are sent exactly as built; the transport adds none.

use super::error::ApiError;
use super::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes an `HttpRequest` and returns the raw response.
pub trait HttpTransport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a shared `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl HttpTransport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;
        let url = url.as_str();
        let result = match method {
            HttpMethod::Get => with_headers(self.agent.get(url), &headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), &headers).call(),
            HttpMethod::Post => send_body(with_headers(self.agent.post(url), &headers), body),
            HttpMethod::Put => send_body(with_headers(self.agent.put(url), &headers), body),
        };

        let mut response = result.map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_body(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<String>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
