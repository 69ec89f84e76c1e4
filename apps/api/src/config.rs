use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::layout::PaperSize;

/// Application configuration loaded from environment variables.
/// Fails at startup if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Enables the LLM description collaborator when set.
    pub anthropic_api_key: Option<String>,
    pub description_timeout: Duration,
    pub paper_size: PaperSize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout_secs = lookup("DESCRIPTION_TIMEOUT_SECS")
            .unwrap_or_else(|| "20".to_string())
            .parse::<u64>()
            .context("DESCRIPTION_TIMEOUT_SECS must be a whole number of seconds")?;

        let paper_size = lookup("PAPER_SIZE")
            .unwrap_or_else(|| "a4".to_string())
            .parse::<PaperSize>()
            .map_err(|e| anyhow!(e))
            .context("PAPER_SIZE is invalid")?;

        Ok(Config {
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            description_timeout: Duration::from_secs(timeout_secs),
            paper_size,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}
