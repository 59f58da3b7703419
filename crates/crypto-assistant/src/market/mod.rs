//! Market Data Integration
//!
//! Abstractions and implementations for market-data providers.

mod coinmarketcap;
mod mock;

pub use coinmarketcap::CoinMarketCapClient;
pub use mock::MockMarketData;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::MarketSnapshot;

/// Market-data provider trait (Strategy pattern)
///
/// Implementations report every failure as a typed error; callers decide
/// whether that becomes absent data.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Top `n` coins by market capitalization, in rank order
    async fn list_top(&self, n: u32) -> Result<Vec<MarketSnapshot>>;

    /// Latest quote for a ticker symbol; `NotFound` when the provider does not know it
    async fn quote(&self, symbol: &str) -> Result<MarketSnapshot>;

    /// Provider name
    fn name(&self) -> &'static str;
}
