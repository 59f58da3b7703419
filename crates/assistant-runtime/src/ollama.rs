//! Ollama LLM Provider
//!
//! Implementation of `LlmProvider` for local Ollama inference.

use std::time::Duration;

use assistant_core::{
    error::{LlmError, Result},
    message::{Message, Role},
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, TokenUsage},
};
use async_trait::async_trait;
use ollama_rs::{
    generation::chat::{ChatMessage, ChatMessageResponse, MessageRole, request::ChatMessageRequest},
    models::ModelOptions,
    Ollama,
};

/// Ollama provider configuration
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    /// Ollama host URL
    pub host: String,

    /// Ollama port
    pub port: u16,

    /// Model used when building default generation options
    pub model: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".into(),
            port: 11434,
            model: "llama3.2".into(),
            timeout_secs: 120,
        }
    }
}

impl OllamaConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("OLLAMA_HOST").unwrap_or(defaults.host);
        let port = std::env::var("OLLAMA_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let model = std::env::var("OLLAMA_MODEL").unwrap_or(defaults.model);
        let timeout_secs = std::env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        Self {
            host,
            port,
            model,
            timeout_secs,
        }
    }
}

/// Ollama LLM provider
pub struct OllamaProvider {
    client: Ollama,
    config: OllamaConfig,
}

impl OllamaProvider {
    /// Create a new Ollama provider with custom host/port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::from_config(OllamaConfig {
            host: host.into(),
            port,
            ..Default::default()
        })
    }

    /// Create from configuration
    pub fn from_config(config: OllamaConfig) -> Self {
        Self {
            client: Ollama::new(&config.host, config.port),
            config,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_config(OllamaConfig::from_env())
    }

    /// Names of locally pulled models
    pub async fn list_models(&self) -> Result<Vec<String>> {
        let models = self
            .client
            .list_local_models()
            .await
            .map_err(|e| LlmError::ProviderUnavailable(e.to_string()))?;

        Ok(models.into_iter().map(|m| m.name).collect())
    }

    /// Convert messages to Ollama format
    fn convert_messages(messages: &[Message]) -> Vec<ChatMessage> {
        messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::System => MessageRole::System,
                    Role::User => MessageRole::User,
                    Role::Assistant => MessageRole::Assistant,
                };
                ChatMessage::new(role, m.content.clone())
            })
            .collect()
    }

    /// Convert Ollama response to a completion
    fn convert_completion(response: ChatMessageResponse, model: &str) -> Completion {
        Completion {
            content: response.message.content,
            model: model.to_string(),
            usage: response.final_data.as_ref().map(|d| {
                let prompt_tokens = u32::try_from(d.prompt_eval_count).unwrap_or(u32::MAX);
                let completion_tokens = u32::try_from(d.eval_count).unwrap_or(u32::MAX);
                TokenUsage {
                    prompt_tokens,
                    completion_tokens,
                    total_tokens: prompt_tokens.saturating_add(completion_tokens),
                }
            }),
            finish_reason: Some(FinishReason::Stop),
        }
    }

    /// Build Ollama generation options
    fn build_options(opts: &GenerationOptions) -> ModelOptions {
        ModelOptions::default()
            .temperature(opts.temperature)
            .top_p(opts.top_p)
            .num_predict(i32::try_from(opts.max_tokens).unwrap_or(i32::MAX))
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "Ollama"
    }

    async fn health_check(&self) -> Result<bool> {
        match self.list_models().await {
            Ok(models) => {
                // Local names carry a tag ("llama3.2:latest")
                let model = self.config.model.as_str();
                let pulled = models
                    .iter()
                    .any(|name| name == model || name.split(':').next() == Some(model));
                if !pulled {
                    tracing::warn!(model = %self.config.model, "Model not pulled; run `ollama pull`");
                }
                Ok(pulled)
            }
            Err(e) => {
                tracing::warn!("Ollama health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request = ChatMessageRequest::new(
            options.model.clone(),
            Self::convert_messages(messages),
        )
        .options(Self::build_options(options));

        let response = tokio::time::timeout(
            Duration::from_secs(self.config.timeout_secs),
            self.client.send_chat_messages(request),
        )
        .await
        .map_err(|_| LlmError::Timeout(self.config.timeout_secs))?
        .map_err(|e| LlmError::Provider(e.to_string()))?;

        Ok(Self::convert_completion(response, &options.model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = OllamaConfig::default();
        assert_eq!(config.host, "http://localhost");
        assert_eq!(config.port, 11434);
        assert_eq!(config.model, "llama3.2");
    }

    #[test]
    fn test_message_conversion() {
        let messages = vec![
            Message::system("You are a crypto analyst."),
            Message::user("Summarize the news."),
        ];

        let converted = OllamaProvider::convert_messages(&messages);
        assert_eq!(converted.len(), 2);
    }
}
