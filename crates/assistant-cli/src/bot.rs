//! Telegram front end.
//!
//! Requires the `telegram` feature to be enabled.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{error, info};

use crypto_assistant::{CryptoAssistant, split_message};

use crate::chat::reply_for;

/// Configuration for the Telegram bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Bot token from @BotFather
    pub bot_token: String,
    /// Single-message limit; longer replies are split
    pub max_message_len: usize,
}

impl BotConfig {
    /// `TELEGRAM_BOT_TOKEN` from the environment, if set
    pub fn from_env(max_message_len: usize) -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())?;
        Some(Self {
            bot_token,
            max_message_len,
        })
    }
}

/// Answer messages until the process is interrupted
///
/// Updates are dispatched concurrently; handlers share the assistant
/// (and its read-only catalog) through an `Arc`.
pub async fn run(config: BotConfig, assistant: Arc<CryptoAssistant>) {
    let bot = Bot::new(&config.bot_token);
    let max_len = config.max_message_len;

    info!("Telegram bot started");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let assistant = Arc::clone(&assistant);
        async move {
            let Some(text) = msg.text() else {
                return respond(());
            };

            let reply = reply_for(&assistant, text).await;
            for chunk in split_message(&reply, max_len) {
                if let Err(e) = bot.send_message(msg.chat.id, chunk).await {
                    error!(error = %e, chat_id = msg.chat.id.0, "Failed to send Telegram reply");
                    break;
                }
            }

            respond(())
        }
    })
    .await;
}
