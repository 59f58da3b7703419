//! End-to-end pipeline tests over mock providers.

use std::sync::Arc;

use assistant_core::{GenerationOptions, MockProvider};
use crypto_assistant::{
    AssistantConfig, CryptoAssistant, MockMarketData, MockNewsProvider, Reply, Responder,
};

struct Harness {
    assistant: CryptoAssistant,
    news: Arc<MockNewsProvider>,
    llm: Arc<MockProvider>,
}

async fn harness(market: MockMarketData, news: MockNewsProvider, llm: MockProvider) -> Harness {
    let news = Arc::new(news);
    let llm = Arc::new(llm);
    let assistant = CryptoAssistant::connect(
        Arc::new(market),
        news.clone(),
        Responder::new(llm.clone(), GenerationOptions::default()),
        &AssistantConfig::default(),
    )
    .await;
    Harness { assistant, news, llm }
}

#[tokio::test]
async fn test_answers_from_catalog_name() {
    let h = harness(
        MockMarketData::new(),
        MockNewsProvider::headlines("Solana", 2),
        MockProvider::replying("Solana trades at $195."),
    )
    .await;

    let reply = h.assistant.answer("What is the price of Solana?").await;
    assert_eq!(
        reply,
        Reply::Answered {
            identifier: "SOL".into(),
            text: "Solana trades at $195.".into(),
        }
    );

    let prompt = &h.llm.prompts()[0];
    assert!(prompt.contains("User Query: \"What is the price of Solana?\""));
    assert!(prompt.contains("  - Name: Solana (SOL)"));
    assert!(prompt.contains("  - Current Price: $195.00"));
    assert!(prompt.contains("  1. Solana headline 1 (Source: mockwire)"));
    assert_eq!(h.news.queries(), ["Solana"]);
}

#[tokio::test]
async fn test_answers_from_symbol() {
    let h = harness(
        MockMarketData::new(),
        MockNewsProvider::headlines("Bitcoin", 2),
        MockProvider::replying("ok"),
    )
    .await;

    let reply = h.assistant.answer("how is BTC doing").await;
    assert!(matches!(reply, Reply::Answered { identifier, .. } if identifier == "BTC"));
    assert!(h.llm.prompts()[0].contains("  - Rank: 1"));
}

#[tokio::test]
async fn test_alias_resolves_through_catalog() {
    let h = harness(
        MockMarketData::new(),
        MockNewsProvider::default(),
        MockProvider::replying("ok"),
    )
    .await;

    let reply = h.assistant.answer("is ethereum a good buy").await;
    assert!(matches!(reply, Reply::Answered { identifier, .. } if identifier == "ETH"));
}

#[tokio::test]
async fn test_unidentified_query_skips_providers() {
    let h = harness(
        MockMarketData::new(),
        MockNewsProvider::default(),
        MockProvider::replying("unused"),
    )
    .await;

    assert_eq!(h.assistant.answer("hello there").await, Reply::Unidentified);
    assert!(h.news.queries().is_empty());
    assert!(h.llm.prompts().is_empty());
}

#[tokio::test]
async fn test_no_data_does_not_generate() {
    let h = harness(
        MockMarketData::new(),
        MockNewsProvider::unavailable(),
        MockProvider::replying("unused"),
    )
    .await;

    let reply = h.assistant.answer("what about ZZZQ").await;
    assert_eq!(
        reply,
        Reply::NoData {
            identifier: "ZZZQ".into()
        }
    );
    assert!(h.llm.prompts().is_empty());
}

#[tokio::test]
async fn test_news_only_when_market_is_down() {
    let h = harness(
        MockMarketData::unavailable(),
        MockNewsProvider::headlines("Bitcoin", 1),
        MockProvider::replying("ok"),
    )
    .await;

    let reply = h.assistant.answer("Tell me about Bitcoin").await;
    assert!(matches!(reply, Reply::Answered { identifier, .. } if identifier == "Bitcoin"));
    assert!(h.llm.prompts()[0].contains("No specific market data was found for 'Bitcoin'."));
}

#[tokio::test]
async fn test_generation_failure_still_answers() {
    let h = harness(
        MockMarketData::new(),
        MockNewsProvider::default(),
        MockProvider::failing("offline"),
    )
    .await;

    let text = h.assistant.answer("price of DOGE").await.text();
    assert!(text.starts_with("Sorry, I encountered an error while generating the response"));
}

#[tokio::test]
async fn test_top_coins_listing() {
    let h = harness(
        MockMarketData::new(),
        MockNewsProvider::default(),
        MockProvider::replying("unused"),
    )
    .await;

    let listing = h.assistant.top_coins().unwrap();
    assert!(listing.starts_with("1. Bitcoin (BTC) - Price: $97500.00\n2. Ethereum (ETH)"));
    assert_eq!(listing.lines().count(), 15);
}

#[tokio::test]
async fn test_news_digest_command() {
    let h = harness(
        MockMarketData::new(),
        MockNewsProvider::headlines("Cardano", 3),
        MockProvider::replying("Cardano digest"),
    )
    .await;

    assert_eq!(h.assistant.news_digest("Cardano").await, "Cardano digest");
    assert_eq!(
        h.assistant.news_digest("Polkadot").await,
        "No news found specifically related to this coin."
    );
}
