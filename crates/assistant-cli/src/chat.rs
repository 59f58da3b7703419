//! Message routing for chat front ends.

use crypto_assistant::CryptoAssistant;

pub const GREETING: &str = "Hello, I am Crypto Assistant Bot, You can ask me about top 50 coins, \
                            and other questions about crypto";

const TOP_UNAVAILABLE: &str = "Sorry, I couldn't fetch the top 50 coins right now.";

/// What an inbound chat message asks for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatRoute<'a> {
    Start,
    TopCoins,
    Query(&'a str),
}

pub fn route(text: &str) -> ChatRoute<'_> {
    let text = text.trim();
    if is_start_command(text) {
        ChatRoute::Start
    } else if text.eq_ignore_ascii_case("top50") {
        ChatRoute::TopCoins
    } else {
        ChatRoute::Query(text)
    }
}

/// `/start`, optionally addressed (`/start@BotName`) and with a payload
fn is_start_command(text: &str) -> bool {
    let command = text.split_whitespace().next().unwrap_or_default();
    let command = command.split_once('@').map_or(command, |(name, _)| name);
    command == "/start"
}

/// Full reply text for one inbound message
pub async fn reply_for(assistant: &CryptoAssistant, text: &str) -> String {
    match route(text) {
        ChatRoute::Start => GREETING.to_string(),
        ChatRoute::TopCoins => assistant
            .top_coins()
            .unwrap_or_else(|| TOP_UNAVAILABLE.to_string()),
        ChatRoute::Query(query) => assistant.answer(query).await.text(),
    }
}
