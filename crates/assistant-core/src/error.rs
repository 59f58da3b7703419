//! Error Types

use thiserror::Error;

/// Result type alias for text generation
pub type Result<T> = std::result::Result<T, LlmError>;

/// Text generation error types
#[derive(Error, Debug)]
pub enum LlmError {
    /// Provider returned an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Request did not complete in time
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Provider answered but produced no usable text
    #[error("Empty response from provider")]
    EmptyResponse,

    /// Prompt or response was blocked by the provider's safety filters
    #[error("Response blocked: {0}")]
    Blocked(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rate limited / quota exhausted
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Check if error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable(_) | Self::RateLimited(_) | Self::Timeout(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(msg) => format!("The AI service encountered an error: {msg}"),
            Self::ProviderUnavailable(_) | Self::Timeout(_) => {
                "The AI service is currently unavailable. Please try again.".into()
            }
            Self::EmptyResponse => "The AI service returned an empty response.".into(),
            Self::Blocked(_) => "The AI service declined to answer this request.".into(),
            Self::RateLimited(_) => "The AI service quota is exhausted. Please wait a moment.".into(),
            Self::Auth(_) | Self::Config(_) => "The AI service is not configured correctly.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}
