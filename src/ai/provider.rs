//! Assistant providers
//!
//! [`AiProvider`] picks between the offline placeholder writer and the
//! Anthropic client, and maps model replies onto [`AssistOutput`].

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use super::prompt::{build_prompt, parse_output};
use crate::config::{AiConfig, AiProviderType};
use crate::suggest::{AssistOutput, AssistTask};

mod anthropic;
mod placeholder;
mod sse;

pub use anthropic::AsyncAnthropicClient;
pub use placeholder::PlaceholderWriter;

/// Errors that can occur during AI operations
#[derive(Debug, Error)]
pub enum AiError {
    /// AI is not configured (missing API key or disabled)
    #[error("AI not configured: {0}")]
    NotConfigured(String),

    /// Network error during API request
    #[error("Network error: {0}")]
    Network(String),

    /// API returned an error response
    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Failed to parse API response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Request took longer than the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Request was cancelled
    #[error("Request cancelled")]
    Cancelled,
}

/// AI provider implementations
#[derive(Debug)]
pub enum AiProvider {
    /// Offline generators derived from the post's own words
    Placeholder(PlaceholderWriter),
    /// Anthropic Claude API
    Anthropic(AsyncAnthropicClient),
}

impl AiProvider {
    /// Create an AI provider from configuration
    ///
    /// Returns an error if the configuration is invalid (e.g., missing API key)
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        if !config.enabled {
            return Err(AiError::NotConfigured(
                "AI is disabled in config".to_string(),
            ));
        }

        match config.provider {
            AiProviderType::Placeholder => Ok(AiProvider::Placeholder(PlaceholderWriter::new(
                config.placeholder.delay_ms,
            ))),
            AiProviderType::Anthropic => {
                let api_key = config
                    .anthropic
                    .api_key
                    .as_ref()
                    .filter(|k| !k.trim().is_empty())
                    .ok_or_else(|| {
                        AiError::NotConfigured(
                            "Missing or empty API key in [ai.anthropic] config".to_string(),
                        )
                    })?;

                let model = config
                    .anthropic
                    .model
                    .as_ref()
                    .filter(|m| !m.trim().is_empty())
                    .ok_or_else(|| {
                        AiError::NotConfigured(
                            "Missing or empty model in [ai.anthropic] config".to_string(),
                        )
                    })?;

                Ok(AiProvider::Anthropic(AsyncAnthropicClient::new(
                    api_key.clone(),
                    model.clone(),
                    config.anthropic.max_tokens,
                )))
            }
        }
    }

    /// Run one assistant task against the post text
    pub async fn run(
        &self,
        task: AssistTask,
        text: &str,
        cancel_token: &CancellationToken,
    ) -> Result<AssistOutput, AiError> {
        match self {
            AiProvider::Placeholder(writer) => writer.run(task, text, cancel_token).await,
            AiProvider::Anthropic(client) => {
                let prompt = build_prompt(task, text);
                let response = client.complete(&prompt, cancel_token).await?;
                parse_output(task, &response)
            }
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
