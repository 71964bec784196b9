// Configuration type definitions

use serde::Deserialize;

/// Default change magnitude above which suggestions are refreshed
pub const DEFAULT_REFRESH_THRESHOLD: usize = 100;

/// Default per-request timeout for assistant calls
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Suggestion refresh configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionsConfig {
    /// Character edits (insertions + deletions) needed before a refresh
    #[serde(default = "default_threshold")]
    pub threshold: usize,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

fn default_threshold() -> usize {
    DEFAULT_REFRESH_THRESHOLD
}

fn default_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for SuggestionsConfig {
    fn default() -> Self {
        SuggestionsConfig {
            threshold: DEFAULT_REFRESH_THRESHOLD,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Assistant provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProviderType {
    #[default]
    Placeholder,
    Anthropic,
}

/// Anthropic provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_model() -> Option<String> {
    Some("claude-3-5-haiku-latest".to_string())
}

fn default_max_tokens() -> u32 {
    1024
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        AnthropicConfig {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Offline placeholder generator settings
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceholderConfig {
    /// Simulated latency so loading indicators are visible
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_delay_ms() -> u64 {
    400
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        PlaceholderConfig {
            delay_ms: default_delay_ms(),
        }
    }
}

/// `[ai]` configuration section
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub provider: AiProviderType,
    #[serde(default)]
    pub anthropic: AnthropicConfig,
    #[serde(default)]
    pub placeholder: PlaceholderConfig,
}

fn default_enabled() -> bool {
    true
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            enabled: true,
            provider: AiProviderType::default(),
            anthropic: AnthropicConfig::default(),
            placeholder: PlaceholderConfig::default(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub suggestions: SuggestionsConfig,
    #[serde(default)]
    pub ai: AiConfig,
}
