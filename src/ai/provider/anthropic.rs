//! Anthropic Claude API client
//!
//! Streams a Messages API response over SSE and accumulates the text.

use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use super::AiError;
use super::sse::{AnthropicEventParser, SseParser};

/// Anthropic API endpoint
const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version header
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Async Anthropic Claude API client
#[derive(Debug)]
pub struct AsyncAnthropicClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AsyncAnthropicClient {
    pub fn new(api_key: String, model: String, max_tokens: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            max_tokens,
        }
    }

    /// Request body for a single-turn prompt
    fn request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "stream": true,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        })
    }

    /// Send `prompt` and return the complete response text
    ///
    /// Cancellation is checked before the request and between stream chunks.
    pub async fn complete(
        &self,
        prompt: &str,
        cancel_token: &CancellationToken,
    ) -> Result<String, AiError> {
        if cancel_token.is_cancelled() {
            return Err(AiError::Cancelled);
        }

        let request = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&self.request_body(prompt))
            .send();

        let response = tokio::select! {
            biased;
            _ = cancel_token.cancelled() => return Err(AiError::Cancelled),
            result = request => result.map_err(|e| AiError::Network(e.to_string()))?,
        };

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AiError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let mut stream = response.bytes_stream();
        let mut parser = SseParser::new(AnthropicEventParser);
        let mut text = String::new();

        loop {
            tokio::select! {
                biased;
                _ = cancel_token.cancelled() => return Err(AiError::Cancelled),
                chunk = stream.next() => match chunk {
                    Some(Ok(bytes)) => {
                        for piece in parser.parse_chunk(&bytes) {
                            text.push_str(&piece);
                        }
                    }
                    Some(Err(e)) => return Err(AiError::Network(e.to_string())),
                    None => break,
                },
            }
        }

        if text.trim().is_empty() {
            return Err(AiError::Parse("empty response from API".to_string()));
        }
        Ok(text)
    }
}

#[cfg(test)]
#[path = "anthropic_tests.rs"]
mod anthropic_tests;
