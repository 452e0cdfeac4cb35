use crate::error::Result;
use async_trait::async_trait;

/// Fetch-by-URL capability used by every scraping routine.
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    /// GET `url` and return the decoded body. Non-success statuses are errors.
    async fn get_text(&self, url: &str) -> Result<String>;
}
