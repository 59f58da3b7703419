//! Configuration
//!
//! All settings come from the process environment (binaries load `.env`
//! through `dotenvy` first). Unparseable numbers fall back to defaults.

use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_CMC_API_URL: &str = "https://pro-api.coinmarketcap.com";
pub const DEFAULT_NEWSDATA_API_URL: &str = "https://newsdata.io/api/1/news";
pub const DEFAULT_NEWS_LANGUAGE: &str = "en";
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 4096;

/// Market-data provider settings
#[derive(Clone, Debug)]
pub struct MarketDataConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

/// News provider settings
#[derive(Clone, Debug)]
pub struct NewsConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub language: String,
    /// Articles fetched per aggregation
    pub page_size: u32,
    /// Articles fetched for a direct news digest
    pub digest_page_size: u32,
}

/// Outbound HTTP behavior shared by all providers
#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub max_retries: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: 1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AssistantConfig {
    pub market: MarketDataConfig,
    pub news: NewsConfig,
    pub http: HttpConfig,
    /// Size of the top-N listing used as the coin catalog
    pub catalog_size: u32,
    /// Chat transport single-message limit, in characters
    pub max_message_len: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            market: MarketDataConfig {
                api_key: None,
                base_url: DEFAULT_CMC_API_URL.into(),
            },
            news: NewsConfig {
                api_key: None,
                api_url: DEFAULT_NEWSDATA_API_URL.into(),
                language: DEFAULT_NEWS_LANGUAGE.into(),
                page_size: 3,
                digest_page_size: 5,
            },
            http: HttpConfig::default(),
            catalog_size: 50,
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}

impl AssistantConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let secret = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let config = Self {
            market: MarketDataConfig {
                api_key: secret("COINMARKETCAP_API_KEY"),
                base_url: lookup("COINMARKETCAP_API_URL").unwrap_or(defaults.market.base_url),
            },
            news: NewsConfig {
                api_key: secret("NEWSDATA_API_KEY"),
                api_url: lookup("NEWSDATA_API_URL").unwrap_or(defaults.news.api_url),
                language: lookup("NEWS_LANGUAGE").unwrap_or(defaults.news.language),
                page_size: parsed(&lookup, "NEWS_PAGE_SIZE").unwrap_or(defaults.news.page_size),
                digest_page_size: parsed(&lookup, "DIGEST_PAGE_SIZE")
                    .unwrap_or(defaults.news.digest_page_size),
            },
            http: HttpConfig {
                timeout: parsed(&lookup, "HTTP_TIMEOUT_SECS")
                    .map_or(defaults.http.timeout, Duration::from_secs),
                max_retries: parsed(&lookup, "HTTP_MAX_RETRIES").unwrap_or(defaults.http.max_retries),
            },
            catalog_size: parsed(&lookup, "CATALOG_SIZE").unwrap_or(defaults.catalog_size),
            max_message_len: parsed(&lookup, "MAX_MESSAGE_LEN")
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.max_message_len),
        };

        if config.market.api_key.is_none() {
            tracing::warn!("COINMARKETCAP_API_KEY not set; market data will be unavailable");
        }
        if config.news.api_key.is_none() {
            tracing::warn!("NEWSDATA_API_KEY not set; news will be unavailable");
        }

        config
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}
