//! Content Models
//!
//! Typed shapes of the Wakademy content API responses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

// == Content Kind ==
/// Media type of a library item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Video,
    Podcast,
    Document,
    #[serde(other)]
    Other,
}

// == Feed Type ==
/// The `type` query parameter accepted by the trending and library routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedType {
    All,
    Trending,
    New,
    Podcasts,
    Videos,
    Documents,
}

impl FeedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedType::All => "all",
            FeedType::Trending => "trending",
            FeedType::New => "new",
            FeedType::Podcasts => "podcasts",
            FeedType::Videos => "videos",
            FeedType::Documents => "documents",
        }
    }
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedType {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(FeedType::All),
            "trending" => Ok(FeedType::Trending),
            "new" => Ok(FeedType::New),
            "podcasts" => Ok(FeedType::Podcasts),
            "videos" => Ok(FeedType::Videos),
            "documents" => Ok(FeedType::Documents),
            other => Err(CacheError::InvalidRequest(format!(
                "Unknown feed type: {}",
                other
            ))),
        }
    }
}

// == Content Summary ==
/// One library item as listed by the trending/library routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub views: u64,
}

// == Feed Response ==
/// Body of `GET /api/trending` and `GET /api/library`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedResponse {
    pub data: Vec<ContentSummary>,
    #[serde(default)]
    pub cached: bool,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

// == Content Detail ==
/// Body of `GET /api/content/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetail {
    #[serde(flatten)]
    pub summary: ContentSummary,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

// == Content Payload ==
/// Everything the content cache can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPayload {
    Feed(FeedResponse),
    Content(ContentDetail),
}

impl ContentPayload {
    /// Unwraps a feed, failing if `key` held a content detail.
    pub fn into_feed(self, key: &str) -> Result<FeedResponse> {
        match self {
            ContentPayload::Feed(feed) => Ok(feed),
            ContentPayload::Content(_) => Err(CacheError::PayloadMismatch(key.to_string())),
        }
    }

    /// Unwraps a content detail, failing if `key` held a feed.
    pub fn into_content(self, key: &str) -> Result<ContentDetail> {
        match self {
            ContentPayload::Content(detail) => Ok(detail),
            ContentPayload::Feed(_) => Err(CacheError::PayloadMismatch(key.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_deserialize_camel_case() {
        let summary: ContentSummary = serde_json::from_value(json!({
            "id": "c1",
            "title": "Onboarding",
            "type": "video",
            "thumbnailUrl": "/thumbs/c1.png",
            "createdAt": "2024-03-01T10:00:00Z",
            "views": 12
        }))
        .unwrap();

        assert_eq!(summary.kind, ContentKind::Video);
        assert_eq!(summary.thumbnail_url.as_deref(), Some("/thumbs/c1.png"));
        assert_eq!(summary.views, 12);
        assert!(summary.author.is_none());
    }

    #[test]
    fn test_unknown_kind_is_tolerated() {
        let summary: ContentSummary =
            serde_json::from_value(json!({"id": "x", "title": "t", "type": "webinar"})).unwrap();
        assert_eq!(summary.kind, ContentKind::Other);
    }

    #[test]
    fn test_feed_response_optional_total() {
        let feed: FeedResponse = serde_json::from_value(json!({
            "data": [],
            "cached": true,
            "timestamp": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        assert!(feed.total.is_none());

        let out = serde_json::to_value(&feed).unwrap();
        assert!(out.get("total").is_none());
    }

    #[test]
    fn test_content_detail_flattens_summary() {
        let detail: ContentDetail = serde_json::from_value(json!({
            "id": "c9",
            "title": "Quarterly review",
            "type": "document",
            "fileUrl": "https://files/c9.pdf",
            "tags": ["finance"]
        }))
        .unwrap();

        assert_eq!(detail.summary.id, "c9");
        assert_eq!(detail.summary.kind, ContentKind::Document);
        assert_eq!(detail.tags, vec!["finance".to_string()]);
    }

    #[test]
    fn test_feed_type_parse_and_display() {
        assert_eq!("podcasts".parse::<FeedType>().unwrap(), FeedType::Podcasts);
        assert_eq!(FeedType::New.to_string(), "new");
        assert!("movies".parse::<FeedType>().is_err());
    }

    #[test]
    fn test_payload_mismatch() {
        let payload = ContentPayload::Feed(FeedResponse {
            data: vec![],
            cached: false,
            timestamp: String::new(),
            total: None,
        });
        assert!(matches!(
            payload.into_content("content:1"),
            Err(CacheError::PayloadMismatch(_))
        ));
    }
}
