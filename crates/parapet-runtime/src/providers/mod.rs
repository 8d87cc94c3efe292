//! Generation collaborator interface.
//!
//! The pipeline hands a system prompt and a user prompt to a provider and
//! gets text back. Providers never see the raw question: input redaction
//! happens before prompt assembly, always.
//!
//! ## Security
//!
//! All providers use the [`secrets`] module for credential handling.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod secrets;

#[cfg(feature = "openai")]
mod openai;

pub use secrets::{ApiCredential, CredentialSource};

#[cfg(feature = "openai")]
pub use openai::{OpenAiProvider, OPENAI_API_KEY_ENV};

/// Errors from generation providers.
///
/// Unlike retrieval failures, these propagate to the caller: there is no
/// substitute text to redact and lint when generation fails.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    #[error("Rate limit exceeded, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    ParseError(String),

    #[error("Authentication failed")]
    AuthError,

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Configuration for one generation call.
///
/// Deterministic-leaning by default: low temperature, modest output
/// budget, hard timeout.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Model identifier.
    pub model: String,

    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,

    /// Request timeout.
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 700,
            temperature: 0.1,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Token usage from a completion.
#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// A completed generation.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Generated draft answer; still unredacted and unlinted.
    pub text: String,

    /// Model that actually served the request.
    pub model: String,

    pub usage: TokenUsage,
}

/// Provider abstraction allows swapping generation backends.
///
/// This is the ONLY place where generation calls are made. The decision
/// stage never calls this; it only sees already-redacted text.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Produce a draft answer from a system and user prompt.
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        config: &GenerationConfig,
    ) -> Result<Generation, ProviderError>;

    /// Check if the provider is usable.
    async fn health_check(&self) -> bool;

    /// Provider name for logging.
    fn name(&self) -> &str;
}
