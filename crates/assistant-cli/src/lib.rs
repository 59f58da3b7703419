//! # assistant-cli
//!
//! Front ends for the crypto assistant: a console REPL and, behind the
//! `telegram` feature, a Telegram bot. Both share [`state::bootstrap`].

pub mod chat;
pub mod repl;
pub mod state;

#[cfg(feature = "telegram")]
pub mod bot;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the tracing subscriber: `RUST_LOG` filter (default `info`), logs on stderr
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
