//! Application State
//!
//! Wires configuration, providers and the coin catalog into a ready
//! [`CryptoAssistant`].

use std::sync::Arc;

use assistant_runtime::SelectedProvider;
use crypto_assistant::{
    AssistantConfig, CoinMarketCapClient, CryptoAssistant, MarketDataProvider, NewsProvider,
    NewsdataClient, Responder,
};

/// Build the assistant around `selected` and load the catalog
pub async fn bootstrap(config: &AssistantConfig, selected: SelectedProvider) -> CryptoAssistant {
    match selected.provider.health_check().await {
        Ok(true) => tracing::info!(provider = selected.provider.name(), "✓ Text generation ready"),
        Ok(false) | Err(_) => tracing::warn!(
            provider = selected.provider.name(),
            "⚠ Text generation unavailable - answers will be apologies"
        ),
    }

    let market: Arc<dyn MarketDataProvider> =
        Arc::new(CoinMarketCapClient::new(config.market.clone(), &config.http));
    let news: Arc<dyn NewsProvider> =
        Arc::new(NewsdataClient::new(config.news.clone(), &config.http));
    let responder = Responder::new(selected.provider, selected.options);

    tracing::info!(count = config.catalog_size, "Fetching initial coin list...");
    let assistant = CryptoAssistant::connect(market, news, responder, config).await;
    if assistant.catalog().is_empty() {
        tracing::warn!("Coin catalog empty; identification might be less accurate");
    }

    assistant
}
