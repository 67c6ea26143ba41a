use super::parse::parse_feed;
use super::types::FeedItem;
use super::FeedSource;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

pub struct HttpFeedSource {
    client: Client,
}

impl HttpFeedSource {
    pub fn new(request_timeout_ms: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(request_timeout_ms))
            .user_agent(concat!("shelf-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch_items(&self, url: &str) -> Result<Vec<FeedItem>> {
        let resp = self.client.get(url).send().await
            .with_context(|| format!("feed request failed: {}", url))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("feed {} ({}): {}", url, status, body);
        }

        let bytes = resp.bytes().await
            .with_context(|| format!("failed to read feed body: {}", url))?;
        debug!(url, bytes = bytes.len(), "fetched feed");

        parse_feed(&bytes).with_context(|| format!("failed to parse feed: {}", url))
    }
}
