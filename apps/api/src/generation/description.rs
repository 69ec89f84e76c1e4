//! Per-experience description resolution.
//!
//! Order of preference: the user's own text, then the text-completion
//! collaborator (if one is configured), then `FALLBACK_DESCRIPTION`. Resolution
//! never fails: a resume must always be producible from local data.
//!
//! `AppState` holds an `Arc<dyn DescriptionSource>`, chosen once at startup.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::generation::prompts::{DESCRIPTION_PROMPT_TEMPLATE, DESCRIPTION_SYSTEM};
use crate::llm_client::prompts::PLAIN_TEXT_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError};

/// Used when neither the user nor the collaborator supplies a description.
pub const FALLBACK_DESCRIPTION: &str = "Worked on various projects contributing to company goals.";

#[derive(Debug, Error)]
pub enum DescriptionError {
    #[error("No description source configured")]
    Unavailable,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// External text-completion collaborator for experience descriptions.
///
/// Answers are treated as opaque text.
#[async_trait]
pub trait DescriptionSource: Send + Sync {
    async fn describe(&self, position: &str, company: &str) -> Result<String, DescriptionError>;
}

/// No collaborator: every blank description resolves to the fallback literal.
pub struct FallbackOnly;

#[async_trait]
impl DescriptionSource for FallbackOnly {
    async fn describe(&self, _position: &str, _company: &str) -> Result<String, DescriptionError> {
        Err(DescriptionError::Unavailable)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmDescriber: Anthropic-backed collaborator
// ────────────────────────────────────────────────────────────────────────────

/// Describes experiences through the LLM client.
///
/// The HTTP client is built on first use and reused for the life of the
/// process; construct one `LlmDescriber` at startup and share it.
pub struct LlmDescriber {
    api_key: String,
    client: OnceLock<LlmClient>,
}

impl LlmDescriber {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> Result<&LlmClient, LlmError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = LlmClient::new(self.api_key.clone())?;
        Ok(self.client.get_or_init(|| client))
    }
}

#[async_trait]
impl DescriptionSource for LlmDescriber {
    async fn describe(&self, position: &str, company: &str) -> Result<String, DescriptionError> {
        let prompt = build_description_prompt(position, company);
        let system = format!("{DESCRIPTION_SYSTEM} {PLAIN_TEXT_INSTRUCTION}");
        Ok(self.client()?.complete(&prompt, &system).await?)
    }
}

pub(crate) fn build_description_prompt(position: &str, company: &str) -> String {
    DESCRIPTION_PROMPT_TEMPLATE
        .replace("{position}", position.trim())
        .replace("{company}", company.trim())
}

// ────────────────────────────────────────────────────────────────────────────
// Resolution
// ────────────────────────────────────────────────────────────────────────────

/// Resolves the final description text for one experience.
///
/// The collaborator call is bounded by `timeout`; failure of any kind
/// degrades to `FALLBACK_DESCRIPTION`.
pub async fn resolve_description(
    user_text: Option<&str>,
    position: &str,
    company: &str,
    source: &dyn DescriptionSource,
    timeout: Duration,
) -> String {
    if let Some(text) = user_text.map(str::trim).filter(|t| !t.is_empty()) {
        return text.to_string();
    }

    match tokio::time::timeout(timeout, source.describe(position, company)).await {
        Ok(Ok(text)) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(Ok(_)) => {
            warn!("Description source returned blank text for {position} at {company}");
            FALLBACK_DESCRIPTION.to_string()
        }
        Ok(Err(DescriptionError::Unavailable)) => {
            debug!("No description source; using fallback for {position} at {company}");
            FALLBACK_DESCRIPTION.to_string()
        }
        Ok(Err(e)) => {
            warn!("Description source failed for {position} at {company}: {e}");
            FALLBACK_DESCRIPTION.to_string()
        }
        Err(_) => {
            warn!(
                "Description source timed out after {}ms for {position} at {company}",
                timeout.as_millis()
            );
            FALLBACK_DESCRIPTION.to_string()
        }
    }
}
