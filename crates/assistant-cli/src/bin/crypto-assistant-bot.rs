//! crypto-assistant Telegram bot

use std::sync::Arc;

use anyhow::Context;
use assistant_cli::{bot, init_tracing, state};
use assistant_runtime::SelectedProvider;
use crypto_assistant::AssistantConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AssistantConfig::from_env();
    let bot_config =
        bot::BotConfig::from_env(config.max_message_len).context("TELEGRAM_BOT_TOKEN not set")?;
    let selected = SelectedProvider::from_env()?;
    let assistant = state::bootstrap(&config, selected).await;

    info_banner();
    bot::run(bot_config, Arc::new(assistant)).await;
    Ok(())
}

fn info_banner() {
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 crypto-assistant bot running (Ctrl-C to stop)");
    tracing::info!("══════════════════════════════════════════════════");
}
