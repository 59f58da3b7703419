//! Gemini LLM Provider
//!
//! Implementation of `LlmProvider` over the Generative Language REST API
//! (`models/{model}:generateContent`).

use std::time::Duration;

use assistant_core::{
    error::{LlmError, Result},
    message::{Message, Role},
    provider::{Completion, FinishReason, GenerationOptions, LlmProvider, TokenUsage},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini provider configuration
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// API key; calls fail with a configuration error when absent
    pub api_key: Option<String>,

    /// API base URL
    pub base_url: String,

    /// Model used when building default generation options
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            timeout_secs: 30,
        }
    }
}

impl GeminiConfig {
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let base_url = std::env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        let model = std::env::var("GEMINI_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.into());
        let timeout_secs = std::env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(30);

        if api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set; response generation will fail");
        }

        Self {
            api_key,
            base_url,
            model,
            timeout_secs,
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop_sequences: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

// ============================================================================
// Provider
// ============================================================================

/// Gemini LLM provider
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create from configuration
    pub fn from_config(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_config(GeminiConfig::from_env())
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::Config("GEMINI_API_KEY not set".into()))
    }

    fn text_content(role: &str, text: &str) -> Content {
        Content {
            role: Some(role.into()),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }

    /// Convert messages to Gemini format; system messages become the system instruction
    fn build_request(messages: &[Message], options: &GenerationOptions) -> GenerateRequest {
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect();

        let contents = messages
            .iter()
            .filter_map(|m| match m.role {
                Role::User => Some(Self::text_content("user", &m.content)),
                Role::Assistant => Some(Self::text_content("model", &m.content)),
                Role::System => None,
            })
            .collect();

        GenerateRequest {
            contents,
            system_instruction: (!system.is_empty()).then(|| Content {
                role: None,
                parts: vec![Part {
                    text: Some(system.join("\n\n")),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: options.temperature,
                top_p: options.top_p,
                max_output_tokens: options.max_tokens,
                stop_sequences: options.stop_sequences.clone(),
            },
        }
    }

    /// Convert a Gemini response into a completion, surfacing blocked/empty output as errors
    fn convert_completion(response: GenerateResponse, model: &str) -> Result<Completion> {
        let block_reason = response.prompt_feedback.and_then(|f| f.block_reason);

        let Some(candidate) = response.candidates.into_iter().next() else {
            return Err(block_reason.map_or(LlmError::EmptyResponse, LlmError::Blocked));
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let finish_reason = candidate.finish_reason.as_deref().map(|r| match r {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::Length,
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" => {
                FinishReason::ContentFilter
            }
            _ => FinishReason::Error,
        });

        if text.trim().is_empty() {
            return Err(match (finish_reason, candidate.finish_reason) {
                (Some(FinishReason::ContentFilter), Some(reason)) => LlmError::Blocked(reason),
                _ => LlmError::EmptyResponse,
            });
        }

        Ok(Completion {
            content: text,
            model: model.to_string(),
            usage: response.usage_metadata.map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
                total_tokens: u.total_token_count,
            }),
            finish_reason,
        })
    }

    fn map_transport(&self, err: &reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.config.timeout_secs)
        } else if err.is_connect() {
            LlmError::ProviderUnavailable(err.to_string())
        } else {
            LlmError::Provider(err.to_string())
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn health_check(&self) -> Result<bool> {
        let key = self.api_key()?;
        let url = format!("{}/models", self.config.base_url);

        match self.client.get(&url).header("x-goog-api-key", key).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) => {
                tracing::warn!("Gemini health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let key = self.api_key()?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, options.model
        );
        let request = Self::build_request(messages, options);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited(body),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth(body),
                s if s.is_server_error() => LlmError::ProviderUnavailable(format!("{s}: {body}")),
                s => LlmError::Provider(format!("{s}: {body}")),
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Provider(format!("malformed response: {e}")))?;

        Self::convert_completion(parsed, &options.model)
    }
}
