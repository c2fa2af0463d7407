//! Upstream API paths and cache keys.
//!
//! Keys follow `{category}:{...}` so whole categories can be invalidated by
//! prefix.

use url::form_urlencoded;

use crate::content::FeedType;

pub const TRENDING_ROUTE: &str = "/api/trending";
pub const LIBRARY_ROUTE: &str = "/api/library";
pub const CONTENT_ROUTE: &str = "/api/content";
pub const RELATED_ROUTE: &str = "/api/related-content";

pub const TRENDING_PREFIX: &str = "trending:";
pub const LIBRARY_PREFIX: &str = "library:";
pub const CONTENT_PREFIX: &str = "content:";

/// Prefixes wiped by a full content invalidation.
pub const CONTENT_KEY_PREFIXES: [&str; 3] = [CONTENT_PREFIX, TRENDING_PREFIX, LIBRARY_PREFIX];

pub fn trending_key(feed: FeedType, limit: usize) -> String {
    format!("{}{}:{}", TRENDING_PREFIX, feed, limit)
}

pub fn library_key(feed: FeedType, limit: usize) -> String {
    format!("{}{}:{}", LIBRARY_PREFIX, feed, limit)
}

pub fn content_key(id: &str) -> String {
    format!("{}{}", CONTENT_PREFIX, id)
}

/// True for keys owned by the content facade.
pub fn is_content_key(key: &str) -> bool {
    CONTENT_KEY_PREFIXES
        .iter()
        .any(|prefix| key.starts_with(prefix))
}

// == Library Query ==
/// Filters accepted by `GET /api/library`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryQuery {
    pub feed: FeedType,
    pub limit: usize,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl LibraryQuery {
    pub fn new(feed: FeedType, limit: usize) -> Self {
        Self {
            feed,
            limit,
            search: None,
            category: None,
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// True when a search or category filter narrows the listing.
    pub fn is_filtered(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.is_empty())
            || self.category.as_deref().is_some_and(|c| !c.is_empty())
    }

    pub fn url(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query
            .append_pair("type", self.feed.as_str())
            .append_pair("limit", &self.limit.to_string());
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            query.append_pair("search", search);
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            query.append_pair("category", category);
        }
        format!("{}?{}", LIBRARY_ROUTE, query.finish())
    }
}

pub fn trending_url(feed: FeedType, limit: usize) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("type", feed.as_str())
        .append_pair("limit", &limit.to_string())
        .finish();
    format!("{}?{}", TRENDING_ROUTE, query)
}

pub fn library_url(feed: FeedType, limit: usize) -> String {
    LibraryQuery::new(feed, limit).url()
}

pub fn content_url(id: &str) -> String {
    format!("{}/{}", CONTENT_ROUTE, encode_path_segment(id))
}

/// Percent-encodes one path segment. Space becomes `%20`, and `/` and `+`
/// are escaped so the upstream route sees the id unchanged.
pub fn encode_path_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .map(|chunk| if chunk == "+" { "%20" } else { chunk })
        .collect()
}

/// Ids that would collapse into a dot segment when resolved.
pub fn is_valid_content_id(id: &str) -> bool {
    !matches!(id.trim(), "" | "." | "..")
}

pub fn related_url(id: &str, category: Option<&str>) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("id", id);
    if let Some(category) = category {
        query.append_pair("category", category);
    }
    format!("{}?{}", RELATED_ROUTE, query.finish())
}
