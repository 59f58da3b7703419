//! News digest for a single coin.

use std::fmt::Write;
use std::sync::Arc;

use crate::config::NewsConfig;
use crate::model::NewsArticle;
use crate::news::NewsProvider;
use crate::responder::Responder;

/// Reply when no fetched article mentions the coin
pub const NO_RELATED_NEWS: &str = "No news found specifically related to this coin.";

/// Keep only articles whose title or description mentions `term`
pub fn filter_related(articles: Vec<NewsArticle>, term: &str) -> Vec<NewsArticle> {
    articles.into_iter().filter(|a| a.mentions(term)).collect()
}

/// Analyst summarization prompt over `articles`
pub fn digest_prompt(articles: &[NewsArticle]) -> String {
    let mut news_text = String::new();
    for (i, article) in articles.iter().enumerate() {
        let _ = write!(
            news_text,
            "{}. {}\n{}\nLink: {}\n\n",
            i + 1,
            article.title.as_deref().unwrap_or("No title"),
            article.description.as_deref().unwrap_or("No description"),
            article.link.as_deref().unwrap_or_default(),
        );
    }
    format!(
        "You are an expert crypto analyst.\n\
         Summarize each news article briefly, then provide at least 200 words detailed explanation per article.\n\
         Include the link at the end of each summary.\n\
         Here are the news articles:\n\n{news_text}"
    )
}

/// Fetches coin news and has the generator summarize it
#[derive(Clone)]
pub struct NewsDigest {
    news: Arc<dyn NewsProvider>,
    responder: Responder,
    language: String,
    page_size: u32,
}

impl NewsDigest {
    pub fn new(news: Arc<dyn NewsProvider>, responder: Responder, config: &NewsConfig) -> Self {
        Self {
            news,
            responder,
            language: config.language.clone(),
            page_size: config.digest_page_size,
        }
    }

    /// Summary of recent news mentioning `term`
    pub async fn digest(&self, term: &str) -> String {
        let articles = match self.news.search(term, &self.language, self.page_size).await {
            Ok(articles) => articles,
            Err(e) => {
                tracing::warn!(provider = self.news.name(), query = term, error = %e, "News unavailable");
                Vec::new()
            }
        };

        let related = filter_related(articles, term);
        if related.is_empty() {
            return NO_RELATED_NEWS.to_string();
        }
        tracing::info!(query = term, count = related.len(), "Summarizing news");
        self.responder.generate(&digest_prompt(&related)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssistantConfig;
    use crate::news::MockNewsProvider;
    use assistant_core::{GenerationOptions, MockProvider};

    fn article(title: &str, description: Option<&str>) -> NewsArticle {
        NewsArticle {
            title: Some(title.into()),
            description: description.map(Into::into),
            link: Some("https://news.example/a".into()),
            ..NewsArticle::default()
        }
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let articles = vec![
            article("SOLANA hits record", None),
            article("Markets wrap", Some("solana and friends")),
            article("Bitcoin ETF", Some("flows")),
        ];
        assert_eq!(filter_related(articles, "Solana").len(), 2);
    }

    #[test]
    fn test_digest_prompt_layout() {
        let prompt = digest_prompt(&[article("Solana upgrade", Some("Faster blocks"))]);
        assert!(prompt.starts_with("You are an expert crypto analyst.\nSummarize each news article briefly"));
        assert!(prompt.ends_with(
            "Here are the news articles:\n\n1. Solana upgrade\nFaster blocks\nLink: https://news.example/a\n\n"
        ));
    }

    #[tokio::test]
    async fn test_no_related_news() {
        let news = Arc::new(MockNewsProvider::with_articles(vec![article("Bitcoin ETF", None)]));
        let llm = Arc::new(MockProvider::replying("unused"));
        let digest = NewsDigest::new(
            news,
            Responder::new(llm.clone(), GenerationOptions::default()),
            &AssistantConfig::default().news,
        );

        assert_eq!(digest.digest("Solana").await, NO_RELATED_NEWS);
        assert!(llm.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_is_no_news() {
        let digest = NewsDigest::new(
            Arc::new(MockNewsProvider::unavailable()),
            Responder::new(Arc::new(MockProvider::replying("unused")), GenerationOptions::default()),
            &AssistantConfig::default().news,
        );
        assert_eq!(digest.digest("Solana").await, NO_RELATED_NEWS);
    }

    #[tokio::test]
    async fn test_summarizes_related_news() {
        let news = Arc::new(MockNewsProvider::headlines("Solana", 4));
        let llm = Arc::new(MockProvider::replying("Solana summary"));
        let digest = NewsDigest::new(
            news,
            Responder::new(llm.clone(), GenerationOptions::default()),
            &AssistantConfig::default().news,
        );

        assert_eq!(digest.digest("solana").await, "Solana summary");
        assert!(llm.prompts()[0].contains("4. Solana headline 4\n"));
    }
}
