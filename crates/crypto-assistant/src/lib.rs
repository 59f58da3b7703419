//! # crypto-assistant
//!
//! Answers free-text cryptocurrency questions from live market data and
//! recent news, using a text generator to phrase the answer.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  "What's the price of Solana?"                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  extract   → "Solana"            symbol / name / alias pass │
//! │  resolve   → SOL (Solana)        top-N catalog lookup       │
//! │  aggregate → quote + headlines   market + news providers    │
//! │  respond   → grounded prompt     LlmProvider                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Provider failures never abort a query. A missing quote or empty news
//! list just narrows the prompt, and a query with neither yields
//! [`Reply::NoData`] instead of an ungrounded answer.

mod http;

pub mod aggregator;
pub mod assistant;
pub mod catalog;
pub mod config;
pub mod digest;
pub mod error;
pub mod extract;
pub mod format;
pub mod market;
pub mod model;
pub mod news;
pub mod responder;
pub mod transport;

pub use aggregator::Aggregator;
pub use assistant::{CryptoAssistant, Reply};
pub use catalog::{Catalog, Resolution};
pub use config::AssistantConfig;
pub use digest::NewsDigest;
pub use error::{AssistantError, Result};
pub use market::{CoinMarketCapClient, MarketDataProvider, MockMarketData};
pub use model::{AggregatedBundle, CoinReference, MarketSnapshot, NewsArticle};
pub use news::{MockNewsProvider, NewsProvider, NewsdataClient};
pub use responder::Responder;
pub use transport::split_message;
