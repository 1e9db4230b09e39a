//! Remote item source: the only data dependency of the reader.

mod hn;

use async_trait::async_trait;
use clap::ValueEnum;
use serde::Deserialize;

pub use hn::HnClient;

use crate::error::FetchError;
use crate::store::ItemId;

/// An item exactly as the remote API describes it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawItem {
    pub id: ItemId,
    pub by: Option<String>,
    pub time: i64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub title: Option<String>,
    /// HTML body.
    pub text: Option<String>,
    pub url: Option<String>,
    pub score: i64,
    pub descendants: u64,
    pub kids: Vec<ItemId>,
    pub parts: Vec<ItemId>,
    pub dead: bool,
    pub deleted: bool,
}

/// Which ranked list seeds the root collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Feed {
    #[default]
    Top,
    New,
    Best,
    Ask,
    Show,
    Job,
}

impl Feed {
    /// Parse a feed name from config, ignoring case. Unknown names fall back
    /// to `Top`.
    pub fn from_name(name: &str) -> Self {
        <Feed as ValueEnum>::from_str(name.trim(), true).unwrap_or_default()
    }

    /// Endpoint name of this feed's id list.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Feed::Top => "topstories",
            Feed::New => "newstories",
            Feed::Best => "beststories",
            Feed::Ask => "askstories",
            Feed::Show => "showstories",
            Feed::Job => "jobstories",
        }
    }

    /// Label for the title bar.
    pub fn label(&self) -> &'static str {
        match self {
            Feed::Top => "Top",
            Feed::New => "New",
            Feed::Best => "Best",
            Feed::Ask => "Ask",
            Feed::Show => "Show",
            Feed::Job => "Jobs",
        }
    }
}

/// Anything that can fetch items by id and the root id list.
#[async_trait]
pub trait ItemSource: Send + Sync {
    async fn fetch_item(&self, id: ItemId) -> Result<RawItem, FetchError>;

    async fn fetch_collection(&self) -> Result<Vec<ItemId>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_item_parses_story() {
        let json = r#"{
            "by": "dhouston", "descendants": 71, "id": 8863,
            "kids": [8952, 9224], "score": 111, "time": 1175714200,
            "title": "My YC app: Dropbox", "type": "story",
            "url": "http://www.getdropbox.com/u/2/screencast.html"
        }"#;
        let item: RawItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 8863);
        assert_eq!(item.kind.as_deref(), Some("story"));
        assert_eq!(item.kids, vec![8952, 9224]);
        assert_eq!(item.descendants, 71);
        assert!(item.parts.is_empty());
        assert!(!item.deleted);
    }

    #[test]
    fn raw_item_parses_poll_parts() {
        let json = r#"{"id": 126809, "type": "poll", "parts": [126810, 126811], "kids": []}"#;
        let item: RawItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.parts, vec![126810, 126811]);
    }

    #[test]
    fn feed_names_and_endpoints() {
        assert_eq!(Feed::from_name("best"), Feed::Best);
        assert_eq!(Feed::from_name("Ask"), Feed::Ask);
        assert_eq!(Feed::from_name(" show "), Feed::Show);
        assert_eq!(Feed::from_name("job"), Feed::Job);
        assert_eq!(Feed::from_name("bogus"), Feed::Top);
        assert_eq!(Feed::Top.endpoint(), "topstories");
        assert_eq!(Feed::Job.endpoint(), "jobstories");
    }
}
