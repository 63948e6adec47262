//! Ready-made transport configurations.

use std::time::Duration;

use fakenft_core::error::TransportError;
use fakenft_core::policy::{CircuitBreakerConfig, RetryConfig};

use crate::client::{HttpClientConfig, HttpTransport};

/// The hosted mock server: slow to wake up, occasionally flaky.
fn hosted_config(token: &str) -> HttpClientConfig {
    HttpClientConfig {
        token: Some(token.to_string()),
        retry: RetryConfig {
            max_retries: 3,
            initial_backoff: Duration::from_millis(300),
            max_backoff: Duration::from_secs(5),
            multiplier: 2.0,
            jitter_fraction: 0.1,
        },
        circuit_breaker: CircuitBreakerConfig {
            failure_threshold: 5,
            open_duration: Duration::from_secs(30),
            success_threshold: 1,
        },
        request_timeout: Duration::from_secs(20),
    }
}

/// A development server on the local machine: fail fast, no retries.
fn local_config() -> HttpClientConfig {
    HttpClientConfig {
        token: None,
        retry: RetryConfig::disabled(),
        circuit_breaker: CircuitBreakerConfig {
            failure_threshold: 3,
            open_duration: Duration::from_secs(5),
            success_threshold: 1,
        },
        request_timeout: Duration::from_secs(5),
    }
}

/// Transport for the hosted API with its access token.
pub fn practicum(base_url: &str, token: &str) -> Result<HttpTransport, TransportError> {
    HttpTransport::new(base_url, hosted_config(token))
}

/// Transport for a local server, e.g. `http://localhost:8080`.
pub fn local(base_url: &str) -> Result<HttpTransport, TransportError> {
    HttpTransport::new(base_url, local_config())
}
