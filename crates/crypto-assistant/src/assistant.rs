//! Pipeline façade: extract → resolve → aggregate → respond.

use std::fmt::Write;
use std::sync::Arc;

use tracing::info;

use crate::aggregator::Aggregator;
use crate::catalog::Catalog;
use crate::config::AssistantConfig;
use crate::digest::NewsDigest;
use crate::extract::extract;
use crate::format::{NOT_AVAILABLE, format_usd, or_na};
use crate::market::MarketDataProvider;
use crate::model::MarketSnapshot;
use crate::news::NewsProvider;
use crate::responder::Responder;

/// Outcome of answering one query
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// No cryptocurrency could be identified in the query
    Unidentified,

    /// Neither provider had anything for the identifier
    NoData { identifier: String },

    /// Generated answer (or the generation apology)
    Answered { identifier: String, text: String },
}

impl Reply {
    /// User-facing message
    pub fn text(&self) -> String {
        match self {
            Self::Unidentified => "I couldn't identify a specific cryptocurrency in your query. \
                                   Please try rephrasing, e.g., 'Tell me about Bitcoin'."
                .to_string(),
            Self::NoData { identifier } => format!(
                "Sorry, I couldn't retrieve any information for '{identifier}'. \
                 It might be an unsupported coin or there was an issue fetching data."
            ),
            Self::Answered { text, .. } => text.clone(),
        }
    }
}

/// `"{n}. {name} ({symbol}) - Price: {price}"` per line
///
/// `n` is the 1-based position in `listing`, whatever rank the provider reported.
pub fn format_top_list(listing: &[MarketSnapshot]) -> String {
    let mut out = String::new();
    for (i, coin) in listing.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(
            out,
            "{}. {} ({}) - Price: {}",
            i + 1,
            coin.name.as_deref().unwrap_or(NOT_AVAILABLE),
            coin.symbol.as_deref().unwrap_or(NOT_AVAILABLE),
            or_na(coin.price_usd, format_usd),
        );
    }
    out
}

/// The assistant: a loaded catalog plus the providers behind it
///
/// Cheap to clone; the catalog is shared read-only.
#[derive(Clone)]
pub struct CryptoAssistant {
    catalog: Arc<Catalog>,
    aggregator: Aggregator,
    responder: Responder,
    digest: NewsDigest,
}

impl CryptoAssistant {
    pub fn new(
        catalog: Catalog,
        market: Arc<dyn MarketDataProvider>,
        news: Arc<dyn NewsProvider>,
        responder: Responder,
        config: &AssistantConfig,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            aggregator: Aggregator::new(market, Arc::clone(&news), &config.news),
            digest: NewsDigest::new(news, responder.clone(), &config.news),
            responder,
        }
    }

    /// Load the top-N catalog from `market`, then build the assistant
    pub async fn connect(
        market: Arc<dyn MarketDataProvider>,
        news: Arc<dyn NewsProvider>,
        responder: Responder,
        config: &AssistantConfig,
    ) -> Self {
        let catalog = Catalog::load(market.as_ref(), config.catalog_size).await;
        Self::new(catalog, market, news, responder, config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Answer a free-text question
    pub async fn answer(&self, query: &str) -> Reply {
        let Some(term) = extract(query) else {
            info!(query, "No cryptocurrency identified");
            return Reply::Unidentified;
        };

        let resolution = self.catalog.resolve(&term);
        info!(
            term = %term,
            symbol = %resolution.symbol,
            from_catalog = resolution.from_catalog,
            "Looking up coin"
        );

        let identifier = resolution.symbol;
        match self.aggregator.aggregate(&identifier).await {
            Some(bundle) => {
                let text = self.responder.respond(query, &bundle).await;
                Reply::Answered { identifier, text }
            }
            None => Reply::NoData { identifier },
        }
    }

    /// Summary of recent news mentioning `term`
    pub async fn news_digest(&self, term: &str) -> String {
        self.digest.digest(term).await
    }

    /// Numbered catalog listing, or `None` when the catalog could not be loaded
    pub fn top_coins(&self) -> Option<String> {
        let listing = self.catalog.listing();
        (!listing.is_empty()).then(|| format_top_list(listing))
    }
}
