pub mod http;
pub mod parse;
pub mod types;

use anyhow::Result;
use async_trait::async_trait;
use types::FeedItem;

/// Something that can turn a feed URL into its items.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_items(&self, url: &str) -> Result<Vec<FeedItem>>;
}
