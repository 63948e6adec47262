//! The `Transport` trait, the core abstraction behind every API call.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::TransportError;
use crate::request::ApiRequest;

/// Transport health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// Endpoint is responding normally.
    Healthy,
    /// Endpoint is responding but recently failed (circuit half-open).
    Degraded,
    /// Endpoint is not accepting requests (circuit open).
    Unhealthy,
    /// Health status is unknown (not tracked by this transport).
    Unknown,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "healthy"),
            Self::Degraded => write!(f, "degraded"),
            Self::Unhealthy => write!(f, "unhealthy"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Single-call request/response mechanism.
///
/// Every call to [`send`](Transport::send) resolves exactly once, with either
/// the decoded JSON body or an error.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` for use across Tokio tasks.
///
/// # Object Safety
/// The trait is object-safe and can be stored as `Arc<dyn Transport>`.
/// Typed decoding lives in [`TransportExt`].
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Send one request and return the JSON response body.
    async fn send(&self, req: ApiRequest) -> Result<Value, TransportError>;

    /// Return the current health status of this transport.
    fn health(&self) -> HealthStatus {
        HealthStatus::Unknown
    }

    /// Return the transport's identifier (base URL or name).
    fn base_url(&self) -> &str;
}

/// Typed convenience layer over any [`Transport`].
#[async_trait]
pub trait TransportExt: Transport {
    /// Send `req` and decode the response into `T`.
    async fn fetch<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T, TransportError> {
        let value = self.send(req).await?;
        serde_json::from_value(value).map_err(TransportError::Deserialization)
    }
}

impl<T: Transport + ?Sized> TransportExt for T {}

