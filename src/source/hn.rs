use std::time::Duration;

use async_trait::async_trait;

use super::{Feed, ItemSource, RawItem};
use crate::error::FetchError;
use crate::store::ItemId;

/// HTTP client for the Hacker News Firebase API.
#[derive(Clone)]
pub struct HnClient {
    http: reqwest::Client,
    api_url: String,
    feed: Feed,
}

impl HnClient {
    /// Build a client with a per-request timeout.
    pub fn new(api_url: &str, feed: Feed, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hacker_reader_tui/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            feed,
        })
    }

    fn item_url(&self, id: ItemId) -> String {
        format!("{}/item/{}.json", self.api_url, id)
    }

    fn feed_url(&self) -> String {
        format!("{}/{}.json", self.api_url, self.feed.endpoint())
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ItemSource for HnClient {
    async fn fetch_item(&self, id: ItemId) -> Result<RawItem, FetchError> {
        let body = self.get_bytes(&self.item_url(id)).await?;
        parse_item(id, &body)
    }

    async fn fetch_collection(&self) -> Result<Vec<ItemId>, FetchError> {
        let body = self.get_bytes(&self.feed_url()).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Decode an item body. The API answers `null` for ids it does not know.
fn parse_item(id: ItemId, body: &[u8]) -> Result<RawItem, FetchError> {
    let item: Option<RawItem> = serde_json::from_slice(body)?;
    item.ok_or(FetchError::Missing(id))
}
