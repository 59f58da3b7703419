//! Domain Models
//!
//! Value objects created per query and discarded after the reply. Quote
//! figures use `rust_decimal`; every provider field is optional because
//! providers may omit any of them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A known coin from the top-N catalog
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinReference {
    /// Full name (e.g., "Bitcoin")
    pub name: String,

    /// Ticker symbol (e.g., "BTC")
    pub symbol: String,

    /// Provider identifier, when known
    pub id: Option<u64>,
}

impl CoinReference {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            id: None,
        }
    }

    #[must_use]
    pub const fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Point-in-time market quote for one coin
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub rank: Option<u32>,
    pub price_usd: Option<Decimal>,
    pub market_cap_usd: Option<Decimal>,
    pub volume_24h_usd: Option<Decimal>,
    pub percent_change_24h: Option<Decimal>,
    pub circulating_supply: Option<Decimal>,
    pub total_supply: Option<Decimal>,
    pub max_supply: Option<Decimal>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl MarketSnapshot {
    /// Catalog entry for this snapshot; requires both name and symbol
    pub fn to_reference(&self) -> Option<CoinReference> {
        Some(CoinReference {
            name: self.name.clone()?,
            symbol: self.symbol.clone()?,
            id: self.id,
        })
    }
}

/// A news article returned by the news provider
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub source_id: Option<String>,
    pub published_at: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl NewsArticle {
    /// Case-insensitive containment of `term` in the title or description
    pub fn mentions(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [&self.title, &self.description]
            .into_iter()
            .flatten()
            .any(|text| text.to_lowercase().contains(&needle))
    }
}

/// Market data and news merged for one query
///
/// Only the aggregator constructs this, and never with both sections empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregatedBundle {
    /// Identifier the aggregation was run for
    pub query_identifier: String,

    /// Name actually used for the news search
    pub resolved_name_for_news: String,

    /// Absent when the market-data provider had nothing
    pub market_data: Option<MarketSnapshot>,

    pub news_articles: Vec<NewsArticle>,
}

impl AggregatedBundle {
    /// Bundle from fetched parts, or `None` when both parts are empty
    pub fn from_parts(
        query_identifier: impl Into<String>,
        resolved_name_for_news: impl Into<String>,
        market_data: Option<MarketSnapshot>,
        news_articles: Vec<NewsArticle>,
    ) -> Option<Self> {
        if market_data.is_none() && news_articles.is_empty() {
            return None;
        }
        Some(Self {
            query_identifier: query_identifier.into(),
            resolved_name_for_news: resolved_name_for_news.into(),
            market_data,
            news_articles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_refuses_empty_parts() {
        assert!(AggregatedBundle::from_parts("BTC", "BTC", None, Vec::new()).is_none());

        let bundle = AggregatedBundle::from_parts(
            "BTC",
            "Bitcoin",
            None,
            vec![NewsArticle::default()],
        )
        .unwrap();
        assert_eq!(bundle.resolved_name_for_news, "Bitcoin");
    }

    #[test]
    fn test_snapshot_to_reference_requires_name_and_symbol() {
        let snapshot = MarketSnapshot {
            id: Some(1),
            name: Some("Bitcoin".into()),
            symbol: Some("BTC".into()),
            ..Default::default()
        };
        assert_eq!(
            snapshot.to_reference(),
            Some(CoinReference::new("Bitcoin", "BTC").with_id(1))
        );

        let nameless = MarketSnapshot {
            symbol: Some("BTC".into()),
            ..Default::default()
        };
        assert!(nameless.to_reference().is_none());
    }

    #[test]
    fn test_article_mentions_is_case_insensitive() {
        let article = NewsArticle {
            title: Some("Solana rallies".into()),
            description: None,
            ..Default::default()
        };
        assert!(article.mentions("SOLANA"));
        assert!(!article.mentions("Cardano"));
    }
}
