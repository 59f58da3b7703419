//! Error Types for the Crypto Assistant
//!
//! Provider clients return these as typed values; the aggregator, digest and
//! catalog loader are the boundaries where they are logged and turned into
//! absent data.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssistantError>;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request to {provider} timed out")]
    Timeout { provider: &'static str },

    #[error("Rate limited by {provider}")]
    RateLimited { provider: &'static str },

    #[error("{provider} returned HTTP {status}")]
    Http {
        provider: &'static str,
        status: u16,
    },

    #[error("{provider} API error: {message}")]
    Api {
        provider: &'static str,
        message: String,
    },

    #[error("Coin not found: {0}")]
    NotFound(String),

    #[error("Malformed response from {provider}: {message}")]
    Malformed {
        provider: &'static str,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AssistantError {
    /// Transient failures worth a bounded retry
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::RateLimited { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            Self::Network(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// Map a reqwest transport failure for a named provider
    pub fn transport(provider: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { provider }
        } else {
            Self::Network(err)
        }
    }
}
