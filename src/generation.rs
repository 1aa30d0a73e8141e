//! Generation flow: turns user text into a model reply
//!
//! Failures come back as a tagged [`GenerationError`] instead of being raised;
//! [`reply_text`] picks the user-visible string for each outcome.

use crate::llm::{LlmError, LlmRequest, LlmService};
use std::sync::Arc;
use thiserror::Error;

/// Instruction prepended to every user question
pub const PROMPT_PREFIX: &str =
    "Ти корисний помічник, який відповідає українською мовою. Питання користувача: ";

pub const NO_ANSWER_REPLY: &str = "Вибачте, не вдалося отримати відповідь від Gemini.";

pub const UNAVAILABLE_REPLY: &str = "❗ Gemini API наразі недоступний. Будь ласка, перевір, \
     чи встановлено змінну оточення GEMINI_API_KEY та чи є підключення до мережі.";

pub const PROVIDER_ERROR_REPLY: &str =
    "😔 Вибачте, сталася помилка при зверненні до Gemini API. Перевірте свій API-ключ.";

pub const UNKNOWN_ERROR_REPLY: &str =
    "😔 Вибачте, сталася непередбачена помилка. Спробуйте ще раз.";

/// Why a generation produced no model text
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("generation client is not configured")]
    Unavailable,
    #[error("provider error: {0}")]
    Provider(LlmError),
    #[error("generation failed: {0}")]
    Unknown(LlmError),
}

/// Tag of a [`GenerationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    Unavailable,
    ProviderError,
    Unknown,
}

impl GenerationError {
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            GenerationError::Unavailable => GenerationErrorKind::Unavailable,
            GenerationError::Provider(_) => GenerationErrorKind::ProviderError,
            GenerationError::Unknown(_) => GenerationErrorKind::Unknown,
        }
    }
}

impl From<LlmError> for GenerationError {
    fn from(e: LlmError) -> Self {
        if e.kind.is_provider_reported() {
            GenerationError::Provider(e)
        } else {
            GenerationError::Unknown(e)
        }
    }
}

/// Single-call bridge to the model
#[derive(Clone)]
pub struct GenerationFlow {
    client: Option<Arc<dyn LlmService>>,
}

impl GenerationFlow {
    pub fn new(client: Option<Arc<dyn LlmService>>) -> Self {
        Self { client }
    }

    /// Wrap `text` in the instruction template
    pub fn build_prompt(text: &str) -> String {
        format!("{PROMPT_PREFIX}{text}")
    }

    /// Run one generation. `Ok` may hold an empty string.
    pub async fn generate(&self, text: &str) -> Result<String, GenerationError> {
        let Some(client) = &self.client else {
            tracing::warn!("Generation requested but no client is configured");
            return Err(GenerationError::Unavailable);
        };

        let request = LlmRequest::new(Self::build_prompt(text));
        match client.complete(&request).await {
            Ok(response) => {
                if response.is_empty() {
                    tracing::warn!(
                        finish_reason = response.finish_reason.as_deref().unwrap_or("none"),
                        "Model returned an empty answer"
                    );
                }
                Ok(response.text)
            }
            Err(e) => {
                let err = GenerationError::from(e);
                match &err {
                    GenerationError::Provider(e) => {
                        tracing::error!(kind = ?e.kind, error = %e.message, "Gemini API error");
                    }
                    _ => {
                        tracing::error!(error = ?err, "Unexpected error while handling Gemini request");
                    }
                }
                Err(err)
            }
        }
    }
}

/// User-visible reply for a generation outcome
pub fn reply_text(outcome: &Result<String, GenerationError>) -> String {
    match outcome {
        Ok(text) if !text.trim().is_empty() => text.clone(),
        Ok(_) => NO_ANSWER_REPLY.to_string(),
        Err(e) => match e.kind() {
            GenerationErrorKind::Unavailable => UNAVAILABLE_REPLY.to_string(),
            GenerationErrorKind::ProviderError => PROVIDER_ERROR_REPLY.to_string(),
            GenerationErrorKind::Unknown => UNKNOWN_ERROR_REPLY.to_string(),
        },
    }
}
