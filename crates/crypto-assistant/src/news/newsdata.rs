//! Newsdata.io news client.
//!
//! API documentation: https://newsdata.io/documentation

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::NewsProvider;
use crate::config::{HttpConfig, NewsConfig};
use crate::error::{AssistantError, Result};
use crate::http::{build_client, read_body, status_error, with_retries};
use crate::model::NewsArticle;

const PROVIDER: &str = "Newsdata.io";

#[derive(Debug, Deserialize)]
struct NewsResponse {
    status: Option<String>,
    #[serde(default)]
    results: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    link: Option<String>,
    description: Option<String>,
    source_id: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    keywords: Option<Vec<String>>,
}

impl From<RawArticle> for NewsArticle {
    fn from(raw: RawArticle) -> Self {
        Self {
            title: raw.title,
            link: raw.link,
            description: raw.description,
            source_id: raw.source_id,
            published_at: raw.pub_date,
            keywords: raw.keywords.unwrap_or_default(),
        }
    }
}

/// Boolean search restricting results to crypto coverage
fn search_query(name: &str) -> String {
    format!("\"{name}\" AND (cryptocurrency OR crypto OR blockchain)")
}

/// Provider message from a failed response: `results.message` or the first list entry
fn error_message(results: &serde_json::Value) -> String {
    let message = match results {
        serde_json::Value::Object(map) => map.get("message"),
        serde_json::Value::Array(items) => items.first(),
        _ => None,
    };
    match message {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "Unknown Newsdata.io API error".to_string(),
    }
}

fn parse_response(body: &str) -> Result<Vec<NewsArticle>> {
    let malformed = |e: serde_json::Error| AssistantError::Malformed {
        provider: PROVIDER,
        message: e.to_string(),
    };
    let response: NewsResponse = serde_json::from_str(body).map_err(malformed)?;

    if response.status.as_deref() != Some("success") {
        return Err(AssistantError::Api {
            provider: PROVIDER,
            message: error_message(&response.results),
        });
    }
    if response.results.is_null() {
        return Ok(Vec::new());
    }

    let raw: Vec<RawArticle> = serde_json::from_value(response.results).map_err(malformed)?;
    Ok(raw.into_iter().map(NewsArticle::from).collect())
}

/// Best error for a non-2xx response
///
/// Error payloads keep the success envelope, so their `results` message wins
/// unless the request was rate limited.
fn error_for_status(status: reqwest::StatusCode, body: &str) -> AssistantError {
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return status_error(PROVIDER, status);
    }
    match serde_json::from_str::<NewsResponse>(body) {
        Ok(parsed) if !parsed.results.is_null() => AssistantError::Api {
            provider: PROVIDER,
            message: error_message(&parsed.results),
        },
        _ => status_error(PROVIDER, status),
    }
}

/// Newsdata.io latest-news client
pub struct NewsdataClient {
    client: Client,
    config: NewsConfig,
    max_retries: u32,
}

impl NewsdataClient {
    pub fn new(config: NewsConfig, http: &HttpConfig) -> Self {
        Self {
            client: build_client(http),
            config,
            max_retries: http.max_retries,
        }
    }
}

#[async_trait]
impl NewsProvider for NewsdataClient {
    async fn search(
        &self,
        query_text: &str,
        language: &str,
        page_size: u32,
    ) -> Result<Vec<NewsArticle>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AssistantError::Config("NEWSDATA_API_KEY not set".into()))?;
        let params = [
            ("apikey", api_key.to_string()),
            ("q", search_query(query_text)),
            ("language", language.to_string()),
            ("size", page_size.to_string()),
        ];

        let body = with_retries(PROVIDER, self.max_retries, || async {
            tracing::debug!(query = query_text, "Newsdata.io request");

            let response = self
                .client
                .get(&self.config.api_url)
                .query(&params)
                .send()
                .await
                .map_err(|e| AssistantError::transport(PROVIDER, e))?;

            let (status, body) = read_body(PROVIDER, response).await?;
            if status.is_success() {
                return Ok(body);
            }
            Err(error_for_status(status, &body))
        })
        .await?;

        parse_response(&body)
    }

    fn name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query() {
        assert_eq!(
            search_query("Bitcoin"),
            r#""Bitcoin" AND (cryptocurrency OR crypto OR blockchain)"#
        );
    }

    #[test]
    fn test_parse_success() {
        let body = r#"{
            "status": "success",
            "totalResults": 2,
            "results": [
                {
                    "title": "Bitcoin tops $70k",
                    "link": "https://example.com/a",
                    "description": "BTC rallied overnight.",
                    "source_id": "coindesk",
                    "pubDate": "2024-05-01 10:00:00",
                    "keywords": ["bitcoin", "markets"]
                },
                {"title": "ETF flows", "keywords": null}
            ]
        }"#;
        let articles = parse_response(body).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source_id.as_deref(), Some("coindesk"));
        assert_eq!(articles[0].published_at.as_deref(), Some("2024-05-01 10:00:00"));
        assert_eq!(articles[0].keywords, ["bitcoin", "markets"]);
        assert!(articles[1].keywords.is_empty());
        assert_eq!(articles[1].link, None);
    }

    #[test]
    fn test_error_object_message() {
        let body = r#"{"status": "error", "results": {"message": "API key invalid", "code": "Unauthorized"}}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, AssistantError::Api { message, .. } if message == "API key invalid"));
    }

    #[test]
    fn test_error_list_message() {
        let body = r#"{"status": "error", "results": ["Rate limit exceeded", "retry later"]}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, AssistantError::Api { message, .. } if message == "Rate limit exceeded"));
    }

    #[test]
    fn test_error_without_message() {
        let body = r#"{"status": "error"}"#;
        let err = parse_response(body).unwrap_err();
        assert!(matches!(err, AssistantError::Api { message, .. } if message.contains("Unknown")));
    }

    #[test]
    fn test_success_without_results() {
        assert!(parse_response(r#"{"status": "success"}"#).unwrap().is_empty());
    }

    #[test]
    fn test_error_for_status() {
        let body = r#"{"status": "error", "results": {"message": "Too many requests"}}"#;
        let err = error_for_status(reqwest::StatusCode::TOO_MANY_REQUESTS, body);
        assert!(matches!(err, AssistantError::RateLimited { .. }));

        let body = r#"{"status": "error", "results": {"message": "API key invalid"}}"#;
        let err = error_for_status(reqwest::StatusCode::UNAUTHORIZED, body);
        assert!(matches!(err, AssistantError::Api { message, .. } if message == "API key invalid"));

        let err = error_for_status(reqwest::StatusCode::BAD_GATEWAY, "");
        assert!(matches!(err, AssistantError::Http { status: 502, .. }));

        let err = error_for_status(reqwest::StatusCode::SERVICE_UNAVAILABLE, r#"{"status": "error"}"#);
        assert!(matches!(err, AssistantError::Http { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_config_error() {
        let client = NewsdataClient::new(
            NewsConfig {
                api_key: None,
                ..crate::config::AssistantConfig::default().news
            },
            &HttpConfig::default(),
        );
        let result = client.search("Bitcoin", "en", 3).await;
        assert!(matches!(result, Err(AssistantError::Config(_))));
    }
}
