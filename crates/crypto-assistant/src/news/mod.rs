//! News Integration
//!
//! Abstractions and implementations for news-search providers.

mod mock;
mod newsdata;

pub use mock::MockNewsProvider;
pub use newsdata::NewsdataClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::NewsArticle;

/// News-search provider trait (Strategy pattern)
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Recent articles about `query_text` (usually a coin name), at most `page_size`
    async fn search(
        &self,
        query_text: &str,
        language: &str,
        page_size: u32,
    ) -> Result<Vec<NewsArticle>>;

    /// Provider name
    fn name(&self) -> &'static str;
}
