//! Catalog Resolver
//!
//! The catalog is the top-N listing fetched once per session. It is never
//! mutated after loading, so it is shared across concurrent requests behind
//! an `Arc` without locking.

use crate::extract::looks_like_symbol;
use crate::market::MarketDataProvider;
use crate::model::{CoinReference, MarketSnapshot};

/// Outcome of resolving a free-text term
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Symbol (or best symbol candidate) to query market data with
    pub symbol: String,

    /// Name to show the user and search news with
    pub display_name: String,

    /// Whether the term matched a catalog entry
    pub from_catalog: bool,
}

/// Resolve `term` against `catalog`.
///
/// Each reference is checked in catalog order, symbol first and then name,
/// both case-insensitively; the first matching reference wins. Misses fall
/// through unchanged: a symbol-shaped term is taken as a literal symbol and
/// anything else is passed on as both symbol candidate and display name.
pub fn resolve(term: &str, catalog: &[CoinReference]) -> Resolution {
    let hit = catalog.iter().find(|coin| {
        coin.symbol.eq_ignore_ascii_case(term) || coin.name.to_lowercase() == term.to_lowercase()
    });

    if let Some(coin) = hit {
        tracing::debug!(term, symbol = %coin.symbol, name = %coin.name, "Resolved from catalog");
        return Resolution {
            symbol: coin.symbol.clone(),
            display_name: coin.name.clone(),
            from_catalog: true,
        };
    }

    if looks_like_symbol(term) {
        tracing::debug!(term, "Not in catalog; using as literal symbol");
    } else {
        tracing::debug!(term, "Not in catalog; passing through for aggregation");
    }

    Resolution {
        symbol: term.to_string(),
        display_name: term.to_string(),
        from_catalog: false,
    }
}

/// Read-only top-N coin catalog
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    listing: Vec<MarketSnapshot>,
    references: Vec<CoinReference>,
}

impl Catalog {
    /// Build from a listing; entries lacking a name or symbol are skipped for resolution
    pub fn from_listing(listing: Vec<MarketSnapshot>) -> Self {
        let references = listing.iter().filter_map(MarketSnapshot::to_reference).collect();
        Self {
            listing,
            references,
        }
    }

    /// Build from bare references (no quote data)
    pub const fn from_references(references: Vec<CoinReference>) -> Self {
        Self {
            listing: Vec::new(),
            references,
        }
    }

    /// Fetch the top `n` coins once; failures leave an empty catalog
    pub async fn load(provider: &dyn MarketDataProvider, n: u32) -> Self {
        match provider.list_top(n).await {
            Ok(listing) => {
                tracing::info!(count = listing.len(), "Fetched coin catalog");
                Self::from_listing(listing)
            }
            Err(e) => {
                tracing::warn!(
                    provider = provider.name(),
                    error = %e,
                    "Could not fetch coin catalog; identification will rely on heuristics"
                );
                Self::default()
            }
        }
    }

    pub fn resolve(&self, term: &str) -> Resolution {
        resolve(term, &self.references)
    }

    pub fn references(&self) -> &[CoinReference] {
        &self.references
    }

    /// Listing snapshots in provider order (rank order for a top-N listing)
    pub fn listing(&self) -> &[MarketSnapshot] {
        &self.listing
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::MockMarketData;

    fn catalog() -> Vec<CoinReference> {
        vec![
            CoinReference::new("Bitcoin", "BTC").with_id(1),
            CoinReference::new("Ethereum", "ETH").with_id(1027),
            CoinReference::new("Shiba Inu", "SHIB").with_id(5994),
            CoinReference::new("Tron", "TRX").with_id(1958),
        ]
    }

    #[test]
    fn test_resolve_by_symbol_case_insensitive() {
        let res = resolve("eth", &catalog());
        assert_eq!(res.symbol, "ETH");
        assert_eq!(res.display_name, "Ethereum");
        assert!(res.from_catalog);
    }

    #[test]
    fn test_resolve_by_name() {
        let res = resolve("shiba inu", &catalog());
        assert_eq!(res.symbol, "SHIB");
        assert_eq!(res.display_name, "Shiba Inu");
    }

    #[test]
    fn test_resolve_first_reference_wins() {
        let refs = vec![
            CoinReference::new("Tron", "TRX"),
            CoinReference::new("TRON Classic", "TRON"),
        ];
        // "tron" matches the first entry by name before the second by symbol
        assert_eq!(resolve("tron", &refs).symbol, "TRX");
    }

    #[test]
    fn test_unknown_symbol_passes_through() {
        let res = resolve("PEPE", &catalog());
        assert_eq!(res.symbol, "PEPE");
        assert_eq!(res.display_name, "PEPE");
        assert!(!res.from_catalog);
    }

    #[test]
    fn test_unknown_name_passes_through() {
        let res = resolve("Render Token", &catalog());
        assert_eq!(res.symbol, "Render Token");
        assert_eq!(res.display_name, "Render Token");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        for term in ["Bitcoin", "eth", "Shiba Inu", "PEPE", "some coin"] {
            let first = resolve(term, &catalog());
            let second = resolve(&first.symbol, &catalog());
            assert_eq!(first.symbol, second.symbol, "term {term}");
        }
    }

    #[tokio::test]
    async fn test_load_builds_references() {
        let catalog = Catalog::load(&MockMarketData::new(), 3).await;
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.listing()[0].symbol.as_deref(), Some("BTC"));
        assert_eq!(catalog.resolve("bitcoin").symbol, "BTC");
    }

    #[tokio::test]
    async fn test_load_failure_gives_empty_catalog() {
        let catalog = Catalog::load(&MockMarketData::unavailable(), 50).await;
        assert!(catalog.is_empty());
        assert_eq!(catalog.resolve("BTC").symbol, "BTC");
    }
}
