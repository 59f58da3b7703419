//! Mock Market Data
//!
//! For testing and offline demos. Returns realistic static quotes.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::MarketDataProvider;
use crate::error::{AssistantError, Result};
use crate::model::MarketSnapshot;

/// Static table in rank order: (symbol, name, price, 24h change)
const TABLE: &[(&str, &str, Decimal, Decimal)] = &[
    ("BTC", "Bitcoin", dec!(97500), dec!(2.5)),
    ("ETH", "Ethereum", dec!(3450), dec!(1.8)),
    ("XRP", "Ripple", dec!(2.35), dec!(0.9)),
    ("SOL", "Solana", dec!(195), dec!(4.2)),
    ("DOGE", "Dogecoin", dec!(0.38), dec!(12.0)),
    ("ADA", "Cardano", dec!(0.95), dec!(-1.2)),
    ("AVAX", "Avalanche", dec!(42.00), dec!(5.5)),
    ("LINK", "Chainlink", dec!(24.50), dec!(3.1)),
    ("SHIB", "Shiba Inu", dec!(0.000022), dec!(-8.0)),
    ("DOT", "Polkadot", dec!(7.20), dec!(0.8)),
    ("BCH", "Bitcoin Cash", dec!(485), dec!(0.7)),
    ("LTC", "Litecoin", dec!(105), dec!(1.5)),
    ("UNI", "Uniswap", dec!(14.20), dec!(2.2)),
    ("ATOM", "Cosmos", dec!(9.80), dec!(1.2)),
    ("MATIC", "Polygon", dec!(0.52), dec!(-0.5)),
];

/// Mock market-data provider with static quotes
pub struct MockMarketData {
    snapshots: Vec<MarketSnapshot>,
    available: bool,
}

impl Default for MockMarketData {
    fn default() -> Self {
        Self::new()
    }
}

impl MockMarketData {
    pub fn new() -> Self {
        let snapshots = TABLE
            .iter()
            .zip(1u32..)
            .map(|(&(symbol, name, price, change), rank)| MarketSnapshot {
                id: Some(u64::from(rank)),
                name: Some(name.to_string()),
                symbol: Some(symbol.to_string()),
                rank: Some(rank),
                price_usd: Some(price),
                market_cap_usd: Some(price * dec!(1_000_000_000)),
                volume_24h_usd: Some(dec!(500_000_000)),
                percent_change_24h: Some(change),
                last_updated: Some(Utc::now()),
                ..MarketSnapshot::default()
            })
            .collect();
        Self::with_snapshots(snapshots)
    }

    /// Serve exactly these snapshots, in this order
    pub const fn with_snapshots(snapshots: Vec<MarketSnapshot>) -> Self {
        Self {
            snapshots,
            available: true,
        }
    }

    /// Provider whose every call fails as if the service were down
    pub const fn unavailable() -> Self {
        Self {
            snapshots: Vec::new(),
            available: false,
        }
    }

    fn check_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(AssistantError::Http {
                provider: "MockMarketData",
                status: 503,
            })
        }
    }
}

#[async_trait]
impl MarketDataProvider for MockMarketData {
    async fn list_top(&self, n: u32) -> Result<Vec<MarketSnapshot>> {
        self.check_available()?;
        let n = usize::try_from(n).unwrap_or(usize::MAX);
        Ok(self.snapshots.iter().take(n).cloned().collect())
    }

    async fn quote(&self, symbol: &str) -> Result<MarketSnapshot> {
        self.check_available()?;
        self.snapshots
            .iter()
            .find(|s| {
                s.symbol
                    .as_deref()
                    .is_some_and(|sym| sym.eq_ignore_ascii_case(symbol))
            })
            .cloned()
            .ok_or_else(|| AssistantError::NotFound(symbol.to_string()))
    }

    fn name(&self) -> &'static str {
        "MockMarketData"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_quote() {
        let market = MockMarketData::new();

        let btc = market.quote("btc").await.unwrap();
        assert_eq!(btc.symbol.as_deref(), Some("BTC"));
        assert_eq!(btc.rank, Some(1));
        assert!(btc.price_usd.unwrap() > Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_unknown_symbol() {
        let market = MockMarketData::new();
        let result = market.quote("NOTREAL").await;
        assert!(matches!(result, Err(AssistantError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_top_in_rank_order() {
        let top = MockMarketData::new().list_top(3).await.unwrap();
        let symbols: Vec<_> = top.iter().filter_map(|s| s.symbol.as_deref()).collect();
        assert_eq!(symbols, ["BTC", "ETH", "XRP"]);
    }

    #[tokio::test]
    async fn test_unavailable() {
        let market = MockMarketData::unavailable();
        assert!(market.list_top(10).await.is_err());
        assert!(market.quote("BTC").await.unwrap_err().is_retryable());
    }
}
