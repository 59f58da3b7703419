//! Response Generator
//!
//! Turns the user query and an aggregated bundle into a grounded prompt and
//! asks the text generator for an answer. Generation failures become an
//! apology string.

use std::sync::Arc;

use assistant_core::{GenerationOptions, LlmError, LlmProvider};
use chrono::SecondsFormat;

use crate::format::{NOT_AVAILABLE, format_percent, format_usd, format_usd_whole, or_na};
use crate::model::AggregatedBundle;

/// Headlines included in the prompt
const MAX_HEADLINES: usize = 5;

/// User-facing reply when text generation fails
pub fn apology(err: &LlmError) -> String {
    format!(
        "Sorry, I encountered an error while generating the response: {}",
        err.user_message()
    )
}

/// Deterministic prompt for `query` grounded on `bundle`
pub fn build_prompt(query: &str, bundle: &AggregatedBundle) -> String {
    let mut parts: Vec<String> = vec![
        "You are an AI Crypto Assistant. Answer the user's question based on the provided data. Be concise and informative.".into(),
        format!("\nUser Query: \"{query}\""),
        "\n--- Provided Data ---".into(),
    ];

    match &bundle.market_data {
        Some(market) => {
            let name = market.name.as_deref().unwrap_or(&bundle.query_identifier);
            let symbol = market.symbol.as_deref().unwrap_or(NOT_AVAILABLE);
            let rank = market
                .rank
                .map_or_else(|| NOT_AVAILABLE.to_string(), |r| r.to_string());
            let updated = market.last_updated.map_or_else(
                || NOT_AVAILABLE.to_string(),
                |t| t.to_rfc3339_opts(SecondsFormat::Millis, true),
            );

            parts.push("\nMarket Data:".into());
            parts.push(format!("  - Name: {name} ({symbol})"));
            parts.push(format!("  - Current Price: {}", or_na(market.price_usd, format_usd)));
            parts.push(format!("  - Market Cap: {}", or_na(market.market_cap_usd, format_usd_whole)));
            parts.push(format!("  - Rank: {rank}"));
            parts.push(format!("  - 24h Change: {}", or_na(market.percent_change_24h, format_percent)));
            parts.push(format!("  - Last Updated: {updated}"));
        }
        None => parts.push(format!(
            "\nNo specific market data was found for '{}'.",
            bundle.query_identifier
        )),
    }

    if bundle.news_articles.is_empty() {
        parts.push("\nNo news data was available.".into());
    } else {
        parts.push("\nRecent News Headlines:".into());
        for (i, article) in bundle.news_articles.iter().take(MAX_HEADLINES).enumerate() {
            parts.push(format!(
                "  {}. {} (Source: {})",
                i + 1,
                article.title.as_deref().unwrap_or(NOT_AVAILABLE),
                article.source_id.as_deref().unwrap_or(NOT_AVAILABLE),
            ));
        }
    }

    parts.push("\n--- End of Provided Data ---".into());
    parts.push("\nBased on this data, please answer the user's query. If the data is insufficient to directly answer, state that.".into());
    parts.join("\n")
}

/// Text generator plus the options it is called with
#[derive(Clone)]
pub struct Responder {
    provider: Arc<dyn LlmProvider>,
    options: GenerationOptions,
}

impl Responder {
    pub fn new(provider: Arc<dyn LlmProvider>, options: GenerationOptions) -> Self {
        Self { provider, options }
    }

    /// Generate text for an arbitrary prompt; failures become the apology
    pub async fn generate(&self, prompt: &str) -> String {
        match self.provider.generate(prompt, &self.options).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(provider = self.provider.name(), error = %e, "Text generation failed");
                apology(&e)
            }
        }
    }

    /// Answer `query` from `bundle`
    pub async fn respond(&self, query: &str, bundle: &AggregatedBundle) -> String {
        self.generate(&build_prompt(query, bundle)).await
    }
}
