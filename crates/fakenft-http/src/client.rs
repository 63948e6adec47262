//! HTTP transport for the FakeNFT REST API, backed by `reqwest`.
//!
//! Features:
//! - Access token header on every request
//! - Retry with exponential backoff for transient errors
//! - Circuit breaker per base URL

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use fakenft_core::error::TransportError;
use fakenft_core::policy::{
    CircuitBreaker, CircuitBreakerConfig, CircuitState, RetryConfig, RetryPolicy,
};
use fakenft_core::request::{ApiRequest, HttpMethod};
use fakenft_core::transport::{HealthStatus, Transport};

/// Header carrying the API access token.
pub const TOKEN_HEADER: &str = "X-Practicum-Mobile-Token";

/// Configuration for `HttpTransport`.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Value for [`TOKEN_HEADER`]; omitted when `None`.
    pub token: Option<String>,
    pub retry: RetryConfig,
    pub circuit_breaker: CircuitBreakerConfig,
    pub request_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            token: None,
            retry: RetryConfig::default(),
            circuit_breaker: CircuitBreakerConfig::default(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl HttpClientConfig {
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// reqwest-backed [`Transport`].
pub struct HttpTransport {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
    retry: RetryPolicy,
    circuit: CircuitBreaker,
    request_timeout: Duration,
}

impl HttpTransport {
    /// Create a transport for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, config: HttpClientConfig) -> Result<Self, TransportError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TransportError::InvalidRequest(format!(
                "base URL must be http(s): '{base_url}'"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            token: config.token,
            http,
            retry: RetryPolicy::new(config.retry),
            circuit: CircuitBreaker::new(config.circuit_breaker),
            request_timeout: config.request_timeout,
        })
    }

    /// Create with default configuration and the given token.
    pub fn with_token(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, TransportError> {
        Self::new(base_url, HttpClientConfig::default().with_token(token))
    }

    pub fn circuit_state(&self) -> CircuitState {
        self.circuit.state()
    }

    async fn send_once(&self, req: &ApiRequest) -> Result<Value, TransportError> {
        let url = endpoint_url(&self.base_url, &req.path);
        let mut builder = match req.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Put => self.http.put(&url),
        };
        builder = builder.header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = &self.token {
            builder = builder.header(TOKEN_HEADER, token);
        }
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(form) = &req.form {
            builder = builder.form(form);
        }

        let resp = builder.send().await.map_err(|e| self.map_reqwest(e))?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| self.map_reqwest(e))?;
        if !status.is_success() {
            return Err(TransportError::Status {
                code: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        decode_body(&body)
    }

    fn map_reqwest(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                ms: self.request_timeout.as_millis() as u64,
            }
        } else {
            TransportError::Http(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, req: ApiRequest) -> Result<Value, TransportError> {
        if !self.circuit.is_allowed() {
            return Err(TransportError::CircuitOpen {
                endpoint: self.base_url.clone(),
            });
        }

        tracing::debug!(request = %req, "sending request");

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.send_once(&req).await {
                Ok(body) => {
                    self.circuit.record_success();
                    return Ok(body);
                }
                Err(e) if e.is_retryable() => {
                    self.circuit.record_failure();
                    match self.retry.backoff(attempt) {
                        Some(delay) if self.circuit.is_allowed() => {
                            tracing::warn!(
                                attempt,
                                delay_ms = delay.as_millis() as u64,
                                error = %e,
                                request = %req,
                                "retrying request"
                            );
                            tokio::time::sleep(delay).await;
                        }
                        _ => {
                            tracing::error!(attempt, error = %e, request = %req, "request failed");
                            return Err(e);
                        }
                    }
                }
                // 4xx, decode errors: the endpoint is healthy, the request is not.
                Err(e) => return Err(e),
            }
        }
    }

    fn health(&self) -> HealthStatus {
        match self.circuit.state() {
            CircuitState::Open => HealthStatus::Unhealthy,
            CircuitState::HalfOpen => HealthStatus::Degraded,
            CircuitState::Closed => HealthStatus::Healthy,
        }
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.is_some())
            .field("circuit", &self.circuit)
            .finish()
    }
}

fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Empty bodies decode as `null`.
fn decode_body(body: &[u8]) -> Result<Value, TransportError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(TransportError::Deserialization)
}
