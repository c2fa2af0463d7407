//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::SharedCache;
use crate::config::Config;
use crate::content::{
    ApiTransport, ContentCache, ContentDetail, ContentSummary, FeedResponse, FeedType,
    HttpTransport, LibraryQuery, DEFAULT_LIBRARY_LIMIT, DEFAULT_TRENDING_LIMIT,
};
use crate::error::{CacheError, Result};
use crate::models::requests::validate_limit;
use crate::models::{
    CacheStatsResponse, HealthResponse, InvalidateRequest, InvalidateResponse, LibraryParams,
    PreloadImagesRequest, PreloadPageRequest, PreloadRelatedRequest, PreloadResponse,
    RelatedParams, TrendingParams,
};
use crate::preload::{PreloadStats, Preloader};

/// Application state shared across all handlers.
///
/// Owns the single content cache and preloader of the process.
#[derive(Clone)]
pub struct AppState {
    pub content: ContentCache,
    pub preloader: Preloader,
}

impl AppState {
    /// Creates a new AppState around a fresh cache and the given transport.
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        let content = ContentCache::new(SharedCache::default(), transport);
        let preloader = Preloader::new(content.clone());
        Self { content, preloader }
    }

    /// Creates a new AppState talking to the configured upstream API.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(&config.api_base_url)?;
        Ok(Self::new(Arc::new(transport)))
    }
}

fn checked_limit(limit: Option<usize>, default: usize) -> Result<usize> {
    let limit = limit.unwrap_or(default);
    match validate_limit(limit) {
        Some(msg) => Err(CacheError::InvalidRequest(msg)),
        None => Ok(limit),
    }
}

/// Handler for GET /api/trending
pub async fn trending_handler(
    State(state): State<AppState>,
    Query(params): Query<TrendingParams>,
) -> Result<Json<FeedResponse>> {
    let feed = params.feed.unwrap_or(FeedType::Trending);
    let limit = checked_limit(params.limit, DEFAULT_TRENDING_LIMIT)?;

    let response = state.content.get_trending_content(feed, limit).await?;
    Ok(Json(response))
}

/// Handler for GET /api/library
///
/// Unfiltered listings are cached; search/category requests pass through.
pub async fn library_handler(
    State(state): State<AppState>,
    Query(params): Query<LibraryParams>,
) -> Result<Json<FeedResponse>> {
    let feed = params.feed.unwrap_or(FeedType::All);
    let limit = checked_limit(params.limit, DEFAULT_LIBRARY_LIMIT)?;

    let query = LibraryQuery {
        feed,
        limit,
        search: params.search,
        category: params.category,
    };

    let response = if query.is_filtered() {
        state.content.search_library(&query).await?
    } else {
        state.content.get_library_content(feed, limit).await?
    };
    Ok(Json(response))
}

/// Handler for GET /api/content/:id
pub async fn content_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContentDetail>> {
    let detail = state.content.get_content_by_id(&id).await?;
    Ok(Json(detail))
}

/// Handler for GET /api/related-content
///
/// Always answers with a list; upstream failures yield `[]`.
pub async fn related_handler(
    State(state): State<AppState>,
    Query(params): Query<RelatedParams>,
) -> Json<Vec<ContentSummary>> {
    let related = state
        .content
        .get_related_content(&params.id, params.category.as_deref())
        .await;
    Json(related)
}

/// Handler for POST /cache/invalidate
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Json(req): Json<InvalidateRequest>,
) -> Json<InvalidateResponse> {
    let removed = state.content.invalidate_content(req.id.as_deref()).await;
    Json(InvalidateResponse { removed })
}

/// Handler for DELETE /cache
pub async fn flush_handler(State(state): State<AppState>) -> Json<InvalidateResponse> {
    let removed = state.content.cache().clear().await;
    Json(InvalidateResponse { removed })
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let stats = state.content.cache().stats().await;
    Json(stats.into())
}

/// Handler for POST /preload/page
pub async fn preload_page_handler(
    State(state): State<AppState>,
    Json(req): Json<PreloadPageRequest>,
) -> Json<PreloadResponse> {
    let queued = state.preloader.preload_by_user_behavior(&req.path);
    Json(PreloadResponse { queued })
}

/// Handler for POST /preload/related
pub async fn preload_related_handler(
    State(state): State<AppState>,
    Json(req): Json<PreloadRelatedRequest>,
) -> Result<Json<PreloadResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let queued = state
        .preloader
        .preload_related_content(&req.id, req.category.as_deref());
    Ok(Json(PreloadResponse { queued }))
}

/// Handler for POST /preload/images
pub async fn preload_images_handler(
    State(state): State<AppState>,
    Json(req): Json<PreloadImagesRequest>,
) -> Result<Json<PreloadResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let queued = state.preloader.preload_images(&req.urls);
    Ok(Json(PreloadResponse { queued }))
}

/// Handler for GET /preload/stats
pub async fn preload_stats_handler(State(state): State<AppState>) -> Json<PreloadStats> {
    Json(state.preloader.stats())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
