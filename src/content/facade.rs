//! Content Cache Facade
//!
//! Pre-configured cached accessors for the content query shapes the web
//! tier uses, plus invalidation after content mutations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::cache::SharedCache;
use crate::content::paths::{
    content_key, content_url, is_content_key, is_valid_content_id, library_key, library_url,
    related_url, trending_key, trending_url, LibraryQuery,
};
use crate::content::{
    ApiTransport, ContentDetail, ContentPayload, ContentSummary, FeedResponse, FeedType,
};
use crate::error::{CacheError, Result};

// == TTLs ==
pub const TRENDING_TTL_MS: u64 = 5 * 60 * 1000;
pub const LIBRARY_TTL_MS: u64 = 3 * 60 * 1000;
pub const CONTENT_TTL_MS: u64 = 10 * 60 * 1000;

// == Default limits ==
pub const DEFAULT_TRENDING_LIMIT: usize = 10;
pub const DEFAULT_LIBRARY_LIMIT: usize = 20;

// == Content Cache ==
/// Cached access to trending, library and single-content data.
#[derive(Clone)]
pub struct ContentCache {
    cache: SharedCache<ContentPayload>,
    transport: Arc<dyn ApiTransport>,
}

impl ContentCache {
    pub fn new(cache: SharedCache<ContentPayload>, transport: Arc<dyn ApiTransport>) -> Self {
        Self { cache, transport }
    }

    /// The underlying cache, for stats and flushing.
    pub fn cache(&self) -> &SharedCache<ContentPayload> {
        &self.cache
    }

    pub fn transport(&self) -> &Arc<dyn ApiTransport> {
        &self.transport
    }

    // == Trending ==
    /// Trending listing, cached for 5 minutes under `trending:{feed}:{limit}`.
    pub async fn get_trending_content(&self, feed: FeedType, limit: usize) -> Result<FeedResponse> {
        self.cached_feed(trending_key(feed, limit), trending_url(feed, limit), TRENDING_TTL_MS)
            .await
    }

    // == Library ==
    /// Library listing, cached for 3 minutes under `library:{feed}:{limit}`.
    pub async fn get_library_content(&self, feed: FeedType, limit: usize) -> Result<FeedResponse> {
        self.cached_feed(library_key(feed, limit), library_url(feed, limit), LIBRARY_TTL_MS)
            .await
    }

    /// Serves a listing from the cache, fetching `url` on a miss.
    ///
    /// `cached` is forced to true when the response came from this cache;
    /// on a fresh fetch it is whatever the upstream reported.
    async fn cached_feed(&self, key: String, url: String, ttl_ms: u64) -> Result<FeedResponse> {
        let fetched = AtomicBool::new(false);
        let payload = self
            .cache
            .with_cache(
                &key,
                || async {
                    fetched.store(true, Ordering::Relaxed);
                    let body: FeedResponse = self.fetch(&url).await?;
                    Ok::<_, CacheError>(ContentPayload::Feed(body))
                },
                Some(ttl_ms),
            )
            .await?;

        let mut feed = payload.into_feed(&key)?;
        if !fetched.load(Ordering::Relaxed) {
            feed.cached = true;
        }
        Ok(feed)
    }

    /// Filtered library listing. Search results are not cached.
    pub async fn search_library(&self, query: &LibraryQuery) -> Result<FeedResponse> {
        self.fetch(&query.url()).await
    }

    // == Content By Id ==
    /// Single content item, cached for 10 minutes under `content:{id}`.
    pub async fn get_content_by_id(&self, id: &str) -> Result<ContentDetail> {
        if !is_valid_content_id(id) {
            return Err(CacheError::InvalidRequest(format!("invalid content id {:?}", id)));
        }
        let key = content_key(id);
        let payload = self
            .cache
            .with_cache(
                &key,
                || async {
                    let detail: ContentDetail = self.fetch(&content_url(id)).await?;
                    Ok::<_, CacheError>(ContentPayload::Content(detail))
                },
                Some(CONTENT_TTL_MS),
            )
            .await?;
        payload.into_content(&key)
    }

    // == Related ==
    /// Items related to `id`. Any failure degrades to an empty list.
    pub async fn get_related_content(&self, id: &str, category: Option<&str>) -> Vec<ContentSummary> {
        match self.fetch(&related_url(id, category)).await {
            Ok(items) => items,
            Err(e) => {
                warn!(id, error = %e, "related content unavailable");
                Vec::new()
            }
        }
    }

    // == Invalidate ==
    /// Drops cached content after a mutation.
    ///
    /// With an id, removes exactly `content:{id}`. Without one, removes every
    /// `content:`, `trending:` and `library:` entry. Returns the number removed.
    pub async fn invalidate_content(&self, id: Option<&str>) -> usize {
        let removed = match id {
            Some(id) => usize::from(self.cache.delete(&content_key(id)).await),
            None => self.cache.delete_where(is_content_key).await,
        };
        info!(id = id.unwrap_or("*"), removed, "content cache invalidated");
        removed
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "fetching from content API");
        let body = self.transport.get_json(path).await?;
        Ok(serde_json::from_value(body)?)
    }
}
