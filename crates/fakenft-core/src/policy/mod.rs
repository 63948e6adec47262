//! Reliability policies applied by transports.
//!
//! ```text
//! Request → [CircuitBreaker] → [RetryPolicy] → wire
//! ```

pub mod circuit_breaker;
pub mod retry;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use retry::{RetryConfig, RetryPolicy};
