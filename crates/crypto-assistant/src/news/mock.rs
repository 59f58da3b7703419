//! Mock News Provider
//!
//! Serves a fixed article list, or fails every call when built with `unavailable()`.

use std::sync::Mutex;

use async_trait::async_trait;

use super::NewsProvider;
use crate::error::{AssistantError, Result};
use crate::model::NewsArticle;

/// Mock news provider with canned articles
pub struct MockNewsProvider {
    articles: Vec<NewsArticle>,
    available: bool,
    /// Query texts seen, in call order
    queries: Mutex<Vec<String>>,
}

impl Default for MockNewsProvider {
    fn default() -> Self {
        Self::with_articles(Vec::new())
    }
}

impl MockNewsProvider {
    pub const fn with_articles(articles: Vec<NewsArticle>) -> Self {
        Self {
            articles,
            available: true,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// `count` generic headlines mentioning `name`
    pub fn headlines(name: &str, count: usize) -> Self {
        let articles = (1..=count)
            .map(|i| NewsArticle {
                title: Some(format!("{name} headline {i}")),
                link: Some(format!("https://news.example/{i}")),
                description: Some(format!("Coverage of {name} markets.")),
                source_id: Some("mockwire".into()),
                ..NewsArticle::default()
            })
            .collect();
        Self::with_articles(articles)
    }

    pub const fn unavailable() -> Self {
        Self {
            articles: Vec::new(),
            available: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Query texts received so far
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl NewsProvider for MockNewsProvider {
    async fn search(
        &self,
        query_text: &str,
        _language: &str,
        page_size: u32,
    ) -> Result<Vec<NewsArticle>> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query_text.to_string());
        }
        if !self.available {
            return Err(AssistantError::Timeout {
                provider: "MockNews",
            });
        }
        let n = usize::try_from(page_size).unwrap_or(usize::MAX);
        Ok(self.articles.iter().take(n).cloned().collect())
    }

    fn name(&self) -> &'static str {
        "MockNews"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_page_size_and_query_log() {
        let news = MockNewsProvider::headlines("Bitcoin", 5);
        let articles = news.search("Bitcoin", "en", 3).await.unwrap();

        assert_eq!(articles.len(), 3);
        assert!(articles[0].mentions("bitcoin"));
        assert_eq!(news.queries(), ["Bitcoin"]);
    }

    #[tokio::test]
    async fn test_unavailable() {
        let news = MockNewsProvider::unavailable();
        assert!(news.search("Bitcoin", "en", 3).await.is_err());
    }
}
