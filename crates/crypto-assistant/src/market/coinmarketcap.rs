//! CoinMarketCap market-data client.
//!
//! Endpoints used:
//! - `/v1/cryptocurrency/listings/latest` for the top-N catalog
//! - `/v1/cryptocurrency/quotes/latest` for single-symbol quotes
//!
//! API documentation: https://coinmarketcap.com/api/documentation/v1/

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use super::MarketDataProvider;
use crate::config::{HttpConfig, MarketDataConfig};
use crate::error::{AssistantError, Result};
use crate::http::{build_client, read_body, status_error, with_retries};
use crate::model::MarketSnapshot;

const PROVIDER: &str = "CoinMarketCap";
const CONVERT: &str = "USD";

// ============================================================================
// API Response Structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: Status,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    error_code: i64,
    error_message: Option<String>,
}

/// Quote lookups by symbol may return one coin or every coin sharing the symbol
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Box<Coin>),
    Many(Vec<Coin>),
}

#[derive(Debug, Deserialize)]
struct Coin {
    id: Option<u64>,
    name: Option<String>,
    symbol: Option<String>,
    cmc_rank: Option<u32>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    circulating_supply: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    total_supply: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    max_supply: Option<Decimal>,
    #[serde(default)]
    quote: HashMap<String, Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default, deserialize_with = "lenient_decimal")]
    price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    market_cap: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    volume_24h: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    percent_change_24h: Option<Decimal>,
    last_updated: Option<DateTime<Utc>>,
}

/// Numeric field that degrades to `None` instead of failing the payload
///
/// Meme coins report supplies (1e30 and up) beyond what `Decimal` holds.
fn lenient_decimal<'de, D>(deserializer: D) -> std::result::Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
        }
        Some(serde_json::Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

impl Coin {
    fn into_snapshot(mut self) -> MarketSnapshot {
        let usd = self.quote.remove(CONVERT);
        MarketSnapshot {
            id: self.id,
            name: self.name,
            symbol: self.symbol,
            rank: self.cmc_rank,
            price_usd: usd.as_ref().and_then(|q| q.price),
            market_cap_usd: usd.as_ref().and_then(|q| q.market_cap),
            volume_24h_usd: usd.as_ref().and_then(|q| q.volume_24h),
            percent_change_24h: usd.as_ref().and_then(|q| q.percent_change_24h),
            circulating_supply: self.circulating_supply,
            total_supply: self.total_supply,
            max_supply: self.max_supply,
            last_updated: usd.and_then(|q| q.last_updated),
        }
    }
}

// ============================================================================
// Payload parsing
// ============================================================================

fn malformed(err: &serde_json::Error) -> AssistantError {
    AssistantError::Malformed {
        provider: PROVIDER,
        message: err.to_string(),
    }
}

/// Decode an envelope and surface `error_code != 0` as an API error
fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<Option<T>> {
    let envelope: Envelope<T> = serde_json::from_str(body).map_err(|e| malformed(&e))?;
    if envelope.status.error_code != 0 {
        return Err(AssistantError::Api {
            provider: PROVIDER,
            message: envelope
                .status
                .error_message
                .unwrap_or_else(|| format!("error code {}", envelope.status.error_code)),
        });
    }
    Ok(envelope.data)
}

fn parse_listing(body: &str) -> Result<Vec<MarketSnapshot>> {
    let coins: Option<Vec<Coin>> = parse_envelope(body)?;
    Ok(coins
        .unwrap_or_default()
        .into_iter()
        .map(Coin::into_snapshot)
        .collect())
}

fn parse_quote(symbol: &str, body: &str) -> Result<MarketSnapshot> {
    let mut data: HashMap<String, OneOrMany> = parse_envelope(body)?.unwrap_or_default();
    let not_found = || AssistantError::NotFound(symbol.to_string());

    match data.remove(symbol).ok_or_else(not_found)? {
        OneOrMany::One(coin) => Ok(coin.into_snapshot()),
        OneOrMany::Many(coins) => coins
            .into_iter()
            .next()
            .map(Coin::into_snapshot)
            .ok_or_else(not_found),
    }
}

/// Best error for a non-2xx response: the body's status message if it has one
fn error_for_status(status: reqwest::StatusCode, body: &str) -> AssistantError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return status_error(PROVIDER, status);
    }
    serde_json::from_str::<Envelope<serde_json::Value>>(body)
        .ok()
        .and_then(|env| env.status.error_message)
        .map_or_else(
            || status_error(PROVIDER, status),
            |message| AssistantError::Api {
                provider: PROVIDER,
                message,
            },
        )
}

// ============================================================================
// CoinMarketCapClient
// ============================================================================

/// CoinMarketCap Pro API client
pub struct CoinMarketCapClient {
    client: Client,
    config: MarketDataConfig,
    max_retries: u32,
}

impl CoinMarketCapClient {
    pub fn new(config: MarketDataConfig, http: &HttpConfig) -> Self {
        Self {
            client: build_client(http),
            config,
            max_retries: http.max_retries,
        }
    }

    /// GET an endpoint and return the body of a 2xx response
    async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AssistantError::Config("COINMARKETCAP_API_KEY not set".into()))?;
        let url = format!("{}{}", self.config.base_url, endpoint);

        with_retries(PROVIDER, self.max_retries, || async {
            tracing::debug!(endpoint, "CoinMarketCap request");

            let response = self
                .client
                .get(&url)
                .header("Accept", "application/json")
                .header("X-CMC_PRO_API_KEY", api_key)
                .query(params)
                .send()
                .await
                .map_err(|e| AssistantError::transport(PROVIDER, e))?;

            let (status, body) = read_body(PROVIDER, response).await?;
            if !status.is_success() {
                return Err(error_for_status(status, &body));
            }
            Ok(body)
        })
        .await
    }
}

#[async_trait]
impl MarketDataProvider for CoinMarketCapClient {
    async fn list_top(&self, n: u32) -> Result<Vec<MarketSnapshot>> {
        let params = [
            ("start", "1".to_string()),
            ("limit", n.to_string()),
            ("convert", CONVERT.to_string()),
        ];
        let body = self.fetch("/v1/cryptocurrency/listings/latest", &params).await?;
        parse_listing(&body)
    }

    async fn quote(&self, symbol: &str) -> Result<MarketSnapshot> {
        let symbol = symbol.to_uppercase();
        let params = [
            ("symbol", symbol.clone()),
            ("convert", CONVERT.to_string()),
        ];
        let body = self.fetch("/v1/cryptocurrency/quotes/latest", &params).await?;
        parse_quote(&symbol, &body)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}
