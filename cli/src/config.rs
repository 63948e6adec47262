//! CLI configuration from the environment.

use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use fakenft_core::FetcherConfig;

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default level when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Everything the CLI needs to talk to the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    pub base_url: String,
    /// Access token; `None` selects the local, token-less profile.
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl CliConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(&std::env::vars().collect())
    }

    /// Reads `FAKENFT_BASE_URL` (required), `FAKENFT_TOKEN`,
    /// `FAKENFT_CONCURRENCY`, `FAKENFT_LOG_LEVEL` and `FAKENFT_LOG_JSON`.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let base_url = vars
            .get("FAKENFT_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .ok_or_else(|| anyhow!("FAKENFT_BASE_URL is not set"))?;

        let token = vars
            .get("FAKENFT_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .cloned();

        let mut fetcher = FetcherConfig::default();
        if let Some(raw) = vars.get("FAKENFT_CONCURRENCY") {
            fetcher.max_concurrency = raw
                .parse()
                .with_context(|| format!("FAKENFT_CONCURRENCY must be a number, got '{raw}'"))?;
        }

        let log = LogConfig {
            level: vars
                .get("FAKENFT_LOG_LEVEL")
                .cloned()
                .unwrap_or_else(default_level),
            json: vars
                .get("FAKENFT_LOG_JSON")
                .is_some_and(|v| matches!(v.as_str(), "1" | "true" | "yes")),
        };

        Ok(Self {
            base_url,
            token,
            fetcher,
            log,
        })
    }
}
