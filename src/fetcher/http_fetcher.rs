use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::app::{MarqueeError, Result};
use crate::config::FetcherConfig;
use crate::fetcher::Fetcher;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarqueeError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        tracing::debug!("Fetched {} bytes from {}", body.len(), url);

        Ok(body)
    }
}
