//! Data Aggregator
//!
//! Merges a market quote and recent news for one identifier. Provider
//! failures are logged and become absent data here; nothing propagates.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::NewsConfig;
use crate::market::MarketDataProvider;
use crate::model::{AggregatedBundle, MarketSnapshot, NewsArticle};
use crate::news::NewsProvider;

/// Fetches and merges market data and news
#[derive(Clone)]
pub struct Aggregator {
    market: Arc<dyn MarketDataProvider>,
    news: Arc<dyn NewsProvider>,
    language: String,
    page_size: u32,
}

impl Aggregator {
    pub fn new(
        market: Arc<dyn MarketDataProvider>,
        news: Arc<dyn NewsProvider>,
        config: &NewsConfig,
    ) -> Self {
        Self {
            market,
            news,
            language: config.language.clone(),
            page_size: config.page_size,
        }
    }

    /// Quote plus headlines for `identifier`, or `None` when neither provider had anything
    ///
    /// The identifier is uppercased for the quote lookup. News is searched by
    /// the quoted coin's name when a quote was found, else by the identifier.
    pub async fn aggregate(&self, identifier: &str) -> Option<AggregatedBundle> {
        let symbol = identifier.to_uppercase();
        let market_data = self.fetch_quote(&symbol).await;

        let news_name = market_data
            .as_ref()
            .and_then(|m| m.name.clone())
            .unwrap_or_else(|| identifier.to_string());
        let news_articles = self.fetch_news(&news_name).await;

        let bundle = AggregatedBundle::from_parts(identifier, news_name, market_data, news_articles);
        if bundle.is_none() {
            info!(identifier, "No market data or news found");
        }
        bundle
    }

    async fn fetch_quote(&self, symbol: &str) -> Option<MarketSnapshot> {
        match self.market.quote(symbol).await {
            Ok(snapshot) => {
                debug!(
                    provider = self.market.name(),
                    symbol,
                    name = snapshot.name.as_deref().unwrap_or_default(),
                    "Fetched market data"
                );
                Some(snapshot)
            }
            Err(e) => {
                warn!(provider = self.market.name(), symbol, error = %e, "Market data unavailable");
                None
            }
        }
    }

    async fn fetch_news(&self, name: &str) -> Vec<NewsArticle> {
        match self.news.search(name, &self.language, self.page_size).await {
            Ok(articles) => {
                debug!(provider = self.news.name(), query = name, count = articles.len(), "Fetched news");
                articles
            }
            Err(e) => {
                warn!(provider = self.news.name(), query = name, error = %e, "News unavailable");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssistantConfig;
    use crate::market::MockMarketData;
    use crate::news::MockNewsProvider;

    fn aggregator(market: MockMarketData, news: Arc<MockNewsProvider>) -> Aggregator {
        Aggregator::new(Arc::new(market), news, &AssistantConfig::default().news)
    }

    #[tokio::test]
    async fn test_quote_and_news() {
        let news = Arc::new(MockNewsProvider::headlines("Bitcoin", 2));
        let agg = aggregator(MockMarketData::new(), Arc::clone(&news));

        let bundle = agg.aggregate("BTC").await.unwrap();
        assert_eq!(bundle.market_data.unwrap().symbol.as_deref(), Some("BTC"));
        assert_eq!(bundle.news_articles.len(), 2);
        assert_eq!(bundle.query_identifier, "BTC");
        assert_eq!(bundle.resolved_name_for_news, "Bitcoin");
        assert_eq!(news.queries(), ["Bitcoin"]);
    }

    #[tokio::test]
    async fn test_lowercase_identifier_is_uppercased_for_quote() {
        let news = Arc::new(MockNewsProvider::default());
        let bundle = aggregator(MockMarketData::new(), news).aggregate("eth").await.unwrap();
        assert_eq!(bundle.query_identifier, "eth");
        assert_eq!(bundle.resolved_name_for_news, "Ethereum");
    }

    #[tokio::test]
    async fn test_news_only_uses_identifier() {
        let news = Arc::new(MockNewsProvider::headlines("Render Token", 1));
        let agg = aggregator(MockMarketData::unavailable(), Arc::clone(&news));

        let bundle = agg.aggregate("Render Token").await.unwrap();
        assert!(bundle.market_data.is_none());
        assert_eq!(bundle.resolved_name_for_news, "Render Token");
        assert_eq!(news.queries(), ["Render Token"]);
    }

    #[tokio::test]
    async fn test_market_only_when_news_fails() {
        let news = Arc::new(MockNewsProvider::unavailable());
        let bundle = aggregator(MockMarketData::new(), news).aggregate("SOL").await.unwrap();
        assert!(bundle.market_data.is_some());
        assert!(bundle.news_articles.is_empty());
    }

    #[tokio::test]
    async fn test_nothing_found_is_none() {
        let news = Arc::new(MockNewsProvider::unavailable());
        assert!(aggregator(MockMarketData::new(), news).aggregate("NOTREAL").await.is_none());
    }
}
