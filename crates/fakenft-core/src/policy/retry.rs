//! Exponential backoff for transient transport failures.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the retry policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries after the first attempt. `0` disables retrying.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Upper bound for any single delay.
    pub max_backoff: Duration,
    /// Growth factor between consecutive delays.
    pub multiplier: f64,
    /// Adds `jitter_fraction / 2` of the capped delay on top of it
    /// (0.0 = no jitter).
    #[serde(default)]
    pub jitter_fraction: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
            multiplier: 2.0,
            jitter_fraction: 0.1,
        }
    }
}

impl RetryConfig {
    /// Never retry.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }
}

/// Stateless: maps a failed attempt number to the delay before the next one.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Delay to wait after failed attempt `attempt` (1-based), or `None` once
    /// the retry budget is spent.
    pub fn backoff(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt > self.config.max_retries {
            return None;
        }
        let max = self.config.max_backoff;
        let exp = self.config.multiplier.powi(attempt.saturating_sub(1) as i32);
        let raw = self.config.initial_backoff.as_secs_f64() * exp;
        // Cap in f64 before building a Duration: `raw` may be inf or NaN.
        let capped = if raw.is_finite() && raw < max.as_secs_f64() {
            Duration::from_secs_f64(raw.max(0.0))
        } else {
            max
        };
        let fraction = self.config.jitter_fraction;
        let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
        Some(capped + capped.mul_f64(fraction * 0.5))
    }
}
