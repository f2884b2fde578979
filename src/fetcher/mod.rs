pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

/// Default client identity sent with every page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[async_trait]
pub trait Fetcher {
    /// Fetch a page and return its markup.
    async fn fetch(&self, url: &str) -> Result<String>;
}
