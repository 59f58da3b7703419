//! Console REPL.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crypto_assistant::{CryptoAssistant, Reply};

const BANNER: &str = "Welcome to the AI Crypto Assistant!
You can ask questions like: 'What's the latest news about Ethereum?' or 'Tell me about Bitcoin price.'
Type 'top50' to see the list of top 50 coins by market cap.
Type 'news <coin>' for a digest of recent news about a coin.
Type 'quit' or 'exit' to leave.";

const PROMPT: &str = "\nAsk me about crypto (or type 'quit'): ";

/// One line of console input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Empty,
    Quit,
    TopCoins,
    News(String),
    Ask(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let lowered = line.to_lowercase();

    match lowered.as_str() {
        "" => Command::Empty,
        "quit" | "exit" => Command::Quit,
        "top50" => Command::TopCoins,
        _ => match line.get(..5) {
            Some(prefix) if prefix.eq_ignore_ascii_case("news ") => {
                Command::News(line[5..].trim().to_string())
            }
            _ => Command::Ask(line.to_string()),
        },
    }
}

/// Run the REPL until `quit`/`exit` or end of input
pub async fn run<R, W>(assistant: &CryptoAssistant, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    output.write_all(BANNER.as_bytes()).await?;
    output.write_all(b"\n").await?;

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let text = match parse_command(&line) {
            Command::Empty => continue,
            Command::Quit => {
                output.write_all(b"Goodbye!\n").await?;
                break;
            }
            Command::TopCoins => assistant.top_coins().map_or_else(
                || "Sorry, I couldn't retrieve the top 50 coins list at this moment.".to_string(),
                |list| format!("\n--- Top 50 Coins by Market Cap ---\n{list}"),
            ),
            Command::News(term) => format!("\nNews digest for {term}:\n{}", assistant.news_digest(&term).await),
            Command::Ask(query) => match assistant.answer(&query).await {
                Reply::Answered { text, .. } => format!("\nAI Assistant:\n{text}"),
                other => other.text(),
            },
        };

        output.write_all(text.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }

    output.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use assistant_core::{GenerationOptions, MockProvider};
    use crypto_assistant::{AssistantConfig, MockMarketData, MockNewsProvider, Responder};

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("   "), Command::Empty);
        assert_eq!(parse_command("QUIT"), Command::Quit);
        assert_eq!(parse_command("exit"), Command::Quit);
        assert_eq!(parse_command("Top50"), Command::TopCoins);
        assert_eq!(parse_command("News Shiba Inu "), Command::News("Shiba Inu".into()));
        assert_eq!(parse_command("news"), Command::Ask("news".into()));
        assert_eq!(
            parse_command("What's up with ETH?"),
            Command::Ask("What's up with ETH?".into())
        );
    }

    async fn assistant() -> CryptoAssistant {
        CryptoAssistant::connect(
            Arc::new(MockMarketData::new()),
            Arc::new(MockNewsProvider::headlines("Ethereum", 2)),
            Responder::new(Arc::new(MockProvider::replying("ETH looks steady.")), GenerationOptions::default()),
            &AssistantConfig::default(),
        )
        .await
    }

    async fn session(input: &str) -> String {
        let assistant = assistant().await;
        let mut output = Vec::new();
        run(&assistant, input.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_session() {
        let out = session("\ntop50\nWhat's up with ETH?\nhello\nquit\nignored\n").await;

        assert!(out.starts_with("Welcome to the AI Crypto Assistant!"));
        assert!(out.contains("--- Top 50 Coins by Market Cap ---\n1. Bitcoin (BTC) - Price: $97500.00"));
        assert!(out.contains("AI Assistant:\nETH looks steady."));
        assert!(out.contains("I couldn't identify a specific cryptocurrency"));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[tokio::test]
    async fn test_news_command_and_eof() {
        let out = session("news Ethereum").await;
        assert!(out.contains("News digest for Ethereum:\nETH looks steady."));
        assert!(!out.contains("Goodbye!"));
    }
}
