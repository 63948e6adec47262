//! Circuit breaker guarding one API endpoint.
//!
//! - `Closed` → `Open`:      `failure_threshold` consecutive failures
//! - `Open` → `HalfOpen`:    `open_duration` elapsed
//! - `HalfOpen` → `Closed`:  `success_threshold` probes succeed
//! - `HalfOpen` → `Open`:    any probe fails

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Observable breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
            Self::HalfOpen => write!(f, "half-open"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub open_duration: Duration,
    pub success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            open_duration: Duration::from_secs(30),
            success_threshold: 1,
        }
    }
}

#[derive(Debug)]
enum Phase {
    Closed { failures: u32 },
    Open { since: Instant },
    HalfOpen { successes: u32 },
}

/// Thread-safe circuit breaker. Clones share state.
#[derive(Clone)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    phase: Arc<Mutex<Phase>>,
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            phase: Arc::new(Mutex::new(Phase::Closed { failures: 0 })),
        }
    }

    /// Current state; an expired `Open` moves to `HalfOpen` here.
    pub fn state(&self) -> CircuitState {
        let mut phase = self.phase.lock().unwrap();
        if let Phase::Open { since } = *phase {
            if since.elapsed() >= self.config.open_duration {
                *phase = Phase::HalfOpen { successes: 0 };
                tracing::info!("circuit breaker → half-open");
            }
        }
        match *phase {
            Phase::Closed { .. } => CircuitState::Closed,
            Phase::Open { .. } => CircuitState::Open,
            Phase::HalfOpen { .. } => CircuitState::HalfOpen,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.state() != CircuitState::Open
    }

    pub fn record_success(&self) {
        let mut phase = self.phase.lock().unwrap();
        match *phase {
            Phase::Closed { .. } => *phase = Phase::Closed { failures: 0 },
            Phase::HalfOpen { successes } => {
                let successes = successes + 1;
                if successes >= self.config.success_threshold {
                    *phase = Phase::Closed { failures: 0 };
                    tracing::info!("circuit breaker → closed");
                } else {
                    *phase = Phase::HalfOpen { successes };
                }
            }
            Phase::Open { .. } => {}
        }
    }

    pub fn record_failure(&self) {
        let mut phase = self.phase.lock().unwrap();
        match *phase {
            Phase::Closed { failures } => {
                let failures = failures + 1;
                if failures >= self.config.failure_threshold {
                    *phase = Phase::Open { since: Instant::now() };
                    tracing::warn!(failures, "circuit breaker → open");
                } else {
                    *phase = Phase::Closed { failures };
                }
            }
            Phase::HalfOpen { .. } => {
                *phase = Phase::Open { since: Instant::now() };
                tracing::warn!("circuit breaker probe failed → open");
            }
            Phase::Open { .. } => {}
        }
    }
}

impl std::fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("state", &self.state())
            .finish()
    }
}
