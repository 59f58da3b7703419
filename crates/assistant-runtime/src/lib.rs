//! # assistant-runtime
//!
//! Text-generation providers for the crypto assistant.
//!
//! ## Providers
//!
//! - **Gemini** (default): Google Generative Language REST API
//! - **Ollama** (feature `ollama`): local inference via Ollama
//!
//! ## Usage
//!
//! ```rust,ignore
//! use assistant_runtime::SelectedProvider;
//!
//! let selected = SelectedProvider::from_env()?;
//! let text = selected.provider.generate(&prompt, &selected.options).await?;
//! ```

pub mod gemini;
#[cfg(feature = "ollama")]
pub mod ollama;

use std::sync::Arc;

pub use gemini::{GeminiConfig, GeminiProvider};
#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};

// Re-export core types for convenience
pub use assistant_core::{GenerationOptions, LlmError, LlmProvider, Message, Result, Role};

/// Backend named by `LLM_PROVIDER`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Gemini,
    #[cfg(feature = "ollama")]
    Ollama,
}

impl Backend {
    /// Parse a backend name; unknown names are a configuration error
    pub fn parse(name: &str) -> Result<Self> {
        match name.trim().to_lowercase().as_str() {
            "" | "gemini" => Ok(Self::Gemini),
            #[cfg(feature = "ollama")]
            "ollama" => Ok(Self::Ollama),
            other => Err(LlmError::Config(format!("unknown LLM_PROVIDER '{other}'"))),
        }
    }
}

/// A provider together with the generation options it should be called with
#[derive(Clone)]
pub struct SelectedProvider {
    pub provider: Arc<dyn LlmProvider>,
    pub options: GenerationOptions,
}

impl SelectedProvider {
    /// Build the backend named by `LLM_PROVIDER` (default: gemini)
    pub fn from_env() -> Result<Self> {
        Backend::parse(&std::env::var("LLM_PROVIDER").unwrap_or_default()).map(Self::for_backend)
    }

    /// Like [`Self::from_env`], but an unknown `LLM_PROVIDER` is logged and Gemini is used
    pub fn from_env_or_default() -> Self {
        Self::named_or_default(&std::env::var("LLM_PROVIDER").unwrap_or_default())
    }

    /// Backend named `name`, falling back to Gemini when the name is unknown
    pub fn named_or_default(name: &str) -> Self {
        let backend = Backend::parse(name).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Falling back to the Gemini backend");
            Backend::Gemini
        });
        Self::for_backend(backend)
    }

    /// Build a specific backend from its environment configuration
    pub fn for_backend(backend: Backend) -> Self {
        match backend {
            Backend::Gemini => {
                let config = GeminiConfig::from_env();
                let options = GenerationOptions::for_model(config.model.clone());
                Self {
                    provider: Arc::new(GeminiProvider::from_config(config)),
                    options,
                }
            }
            #[cfg(feature = "ollama")]
            Backend::Ollama => {
                let config = OllamaConfig::from_env();
                let options = GenerationOptions::for_model(config.model.clone());
                Self {
                    provider: Arc::new(OllamaProvider::from_config(config)),
                    options,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parse() {
        assert_eq!(Backend::parse("").unwrap(), Backend::Gemini);
        assert_eq!(Backend::parse(" Gemini ").unwrap(), Backend::Gemini);
        assert!(matches!(Backend::parse("gpt"), Err(LlmError::Config(_))));
    }

    #[test]
    fn test_unknown_backend_falls_back_to_gemini() {
        let selected = SelectedProvider::named_or_default("gpt");
        assert_eq!(selected.provider.name(), "Gemini");

        let selected = SelectedProvider::named_or_default("gemini");
        assert_eq!(selected.provider.name(), "Gemini");
    }

    #[cfg(feature = "ollama")]
    #[test]
    fn test_backend_parse_ollama() {
        assert_eq!(Backend::parse("OLLAMA").unwrap(), Backend::Ollama);
    }
}
