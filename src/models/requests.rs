//! Request DTOs for the cache service API
//!
//! Defines query strings and JSON bodies accepted by the handlers.

use serde::Deserialize;

use crate::content::FeedType;

/// Largest `limit` a listing request may ask for
pub const MAX_LIMIT: usize = 100;

/// Maximum number of URLs accepted by one `POST /preload/images`
pub const MAX_PRELOAD_IMAGES: usize = 50;

/// Query string of `GET /api/trending`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendingParams {
    #[serde(rename = "type")]
    pub feed: Option<FeedType>,
    pub limit: Option<usize>,
}

/// Query string of `GET /api/library`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryParams {
    #[serde(rename = "type")]
    pub feed: Option<FeedType>,
    pub limit: Option<usize>,
    pub search: Option<String>,
    pub category: Option<String>,
}

/// Query string of `GET /api/related-content`
#[derive(Debug, Clone, Deserialize)]
pub struct RelatedParams {
    pub id: String,
    pub category: Option<String>,
}

/// Body of `POST /cache/invalidate`; no id means "all content"
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvalidateRequest {
    #[serde(default)]
    pub id: Option<String>,
}

/// Body of `POST /preload/page`
#[derive(Debug, Clone, Deserialize)]
pub struct PreloadPageRequest {
    pub path: String,
}

/// Body of `POST /preload/related`
#[derive(Debug, Clone, Deserialize)]
pub struct PreloadRelatedRequest {
    pub id: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl PreloadRelatedRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.id.trim().is_empty() {
            return Some("Content id cannot be empty".to_string());
        }
        None
    }
}

/// Body of `POST /preload/images`
#[derive(Debug, Clone, Deserialize)]
pub struct PreloadImagesRequest {
    pub urls: Vec<String>,
}

impl PreloadImagesRequest {
    pub fn validate(&self) -> Option<String> {
        if self.urls.len() > MAX_PRELOAD_IMAGES {
            return Some(format!(
                "At most {} image URLs per request",
                MAX_PRELOAD_IMAGES
            ));
        }
        None
    }
}

/// Checks a requested listing size.
pub fn validate_limit(limit: usize) -> Option<String> {
    if limit == 0 || limit > MAX_LIMIT {
        return Some(format!("limit must be between 1 and {}", MAX_LIMIT));
    }
    None
}
