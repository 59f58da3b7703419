//! LLM Provider Strategy Pattern
//!
//! Defines a common interface for text-generation backends (Gemini, Ollama,
//! scripted doubles) so prompt construction never depends on a concrete SDK.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use assistant_core::{GenerationOptions, LlmProvider, Message};
//!
//! let provider = GeminiProvider::from_env()?;
//! let completion = provider
//!     .complete(&[Message::user(prompt)], &GenerationOptions::default())
//!     .await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{LlmError, Result};
use crate::message::Message;

/// Configuration for LLM generation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "gemini-2.0-flash", "llama3.2")
    pub model: String,

    /// Temperature for sampling (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Top-p nucleus sampling
    #[serde(default = "default_top_p")]
    pub top_p: f32,

    /// Stop sequences
    #[serde(default)]
    pub stop_sequences: Vec<String>,
}

const fn default_temperature() -> f32 { 0.7 }
const fn default_max_tokens() -> u32 { 2048 }
const fn default_top_p() -> f32 { 0.9 }

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
            stop_sequences: Vec::new(),
        }
    }
}

impl GenerationOptions {
    /// Options for a specific model, everything else default
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }
}

/// Response from an LLM completion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub content: String,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Finish reason
    pub finish_reason: Option<FinishReason>,
}

impl Completion {
    /// Generated text, or `EmptyResponse` when the provider produced only whitespace
    pub fn into_text(self) -> Result<String> {
        if self.content.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(self.content)
    }
}

/// Token usage statistics
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Reason for completion finishing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Error,
}

/// Strategy trait for LLM providers
///
/// Implement this trait to add support for new text-generation backends.
/// The response generator works exclusively through this interface.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logs (e.g., "Gemini")
    fn name(&self) -> &str;

    /// Check if the provider is available and configured correctly
    async fn health_check(&self) -> Result<bool>;

    /// Generate a completion from messages
    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion>;

    /// Convenience: single user prompt in, generated text out
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let completion = self.complete(&[Message::user(prompt)], options).await?;
        completion.into_text()
    }
}
