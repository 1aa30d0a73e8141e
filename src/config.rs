//! Startup configuration
//!
//! Everything is read from the environment. Only the bot token is required;
//! without a Gemini key the bot still runs and answers free text with a fixed
//! "unavailable" notice.

use crate::llm::{GeminiService, LlmError, LlmService, LoggingService, DEFAULT_GEMINI_MODEL};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Fatal configuration problems
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "TELEGRAM_BOT_TOKEN environment variable is required. \
         Please set your Telegram bot token in your shell environment or .env file."
    )]
    MissingBotToken,
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Gemini client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// Gateway base URL replacing the public endpoint
    pub gateway: Option<String>,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Build the logged Gemini client
    pub fn build_service(&self) -> Result<Arc<dyn LlmService>, LlmError> {
        let service = GeminiService::new(
            self.api_key.clone(),
            &self.model,
            self.gateway.as_deref(),
            self.timeout,
        )?;
        Ok(Arc::new(LoggingService::new(Arc::new(service))))
    }
}

/// Bot configuration
#[derive(Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub bot_token: String,
    /// `None` when `GEMINI_API_KEY` is not set
    pub gemini: Option<GeminiConfig>,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_token", &"<redacted>")
            .field("gemini_enabled", &self.gemini.is_some())
            .finish()
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bot_token = get("TELEGRAM_BOT_TOKEN").ok_or(ConfigError::MissingBotToken)?;

        let timeout_secs = match get("LLM_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    name: "LLM_TIMEOUT_SECS",
                    value: raw.clone(),
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let gemini = get("GEMINI_API_KEY").map(|api_key| GeminiConfig {
            api_key,
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gateway: get("LLM_GATEWAY"),
            timeout: Duration::from_secs(timeout_secs),
        });

        Ok(Self { bot_token, gemini })
    }
}
