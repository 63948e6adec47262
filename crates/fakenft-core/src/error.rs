//! Transport-level error types.

use thiserror::Error;

/// Errors that can occur while talking to the FakeNFT API.
///
/// Services and the batch fetcher propagate these unchanged, so a caller
/// always sees the failure exactly as the transport reported it.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed before a response arrived (connection refused, TLS, I/O).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-success status code.
    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// Request timed out after the configured duration.
    #[error("Request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// Circuit breaker is open; the endpoint is considered unhealthy.
    #[error("Circuit breaker open for endpoint: {endpoint}")]
    CircuitOpen { endpoint: String },

    /// The request could not be built (bad base URL, invalid path).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Response body could not be decoded into the expected shape.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// An unexpected error.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns `true` if this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout { .. } => true,
            Self::Status { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the server explicitly reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { code: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> TransportError {
        TransportError::Status { code, body: String::new() }
    }

    #[test]
    fn server_errors_are_retryable() {
        assert!(status(500).is_retryable());
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(TransportError::Timeout { ms: 10 }.is_retryable());
        assert!(TransportError::Http("reset".into()).is_retryable());
    }

    #[test]
    fn client_errors_are_terminal() {
        assert!(!status(400).is_retryable());
        assert!(!status(404).is_retryable());
        assert!(status(404).is_not_found());
        assert!(!TransportError::InvalidRequest("bad".into()).is_retryable());
        assert!(!TransportError::CircuitOpen { endpoint: "x".into() }.is_retryable());
    }
}
