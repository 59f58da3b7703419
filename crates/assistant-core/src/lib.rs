//! # assistant-core
//!
//! Provider-agnostic text generation for the crypto assistant.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │   prompt text ──▶ Message[] ──▶ LlmProvider (Strategy)   │
//! │                                   │                      │
//! │                       Gemini / Ollama / test doubles     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait lets the assistant swap between Gemini, a local
//! Ollama instance, or a scripted provider in tests without touching the
//! prompt-building code.

pub mod error;
pub mod message;
pub mod mock;
pub mod provider;

pub use error::{LlmError, Result};
pub use message::{Message, Role};
pub use mock::MockProvider;
pub use provider::{Completion, FinishReason, GenerationOptions, LlmProvider, TokenUsage};
