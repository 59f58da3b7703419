//! Scripted provider for tests and offline runs.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{LlmError, Result};
use crate::message::Message;
use crate::provider::{Completion, FinishReason, GenerationOptions, LlmProvider};

/// Returns a fixed reply (or fails) and records every prompt it receives
pub struct MockProvider {
    reply: std::result::Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `ProviderUnavailable(reason)`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            reply: Err(reason.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Concatenated message contents of each call, oldest first
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.reply.is_ok())
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let prompt = messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt);
        }

        match &self.reply {
            Ok(text) => Ok(Completion {
                content: text.clone(),
                model: options.model.clone(),
                usage: None,
                finish_reason: Some(FinishReason::Stop),
            }),
            Err(reason) => Err(LlmError::ProviderUnavailable(reason.clone())),
        }
    }
}
