//! API Routes
//!
//! Configures the Axum router with all cache service endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, content_handler, flush_handler, health_handler, invalidate_handler,
    library_handler, preload_images_handler, preload_page_handler, preload_related_handler,
    preload_stats_handler, related_handler, trending_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/trending` - Cached trending listing
/// - `GET /api/library` - Cached library listing (filtered requests pass through)
/// - `GET /api/content/:id` - Cached content detail
/// - `GET /api/related-content` - Related items, `[]` on failure
/// - `POST /cache/invalidate` - Drop one content item or all content keys
/// - `DELETE /cache` - Flush the whole cache
/// - `GET /cache/stats` - Entry count, keys and hit rate
/// - `POST /preload/page` - Warm the routing-table set for a page
/// - `POST /preload/related` - Warm related content for a hovered card
/// - `POST /preload/images` - Prefetch image URLs
/// - `GET /preload/stats` - Preloader state and counters
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/trending", get(trending_handler))
        .route("/api/library", get(library_handler))
        .route("/api/content/:id", get(content_handler))
        .route("/api/related-content", get(related_handler))
        .route("/cache", delete(flush_handler))
        .route("/cache/invalidate", post(invalidate_handler))
        .route("/cache/stats", get(cache_stats_handler))
        .route("/preload/page", post(preload_page_handler))
        .route("/preload/related", post(preload_related_handler))
        .route("/preload/images", post(preload_images_handler))
        .route("/preload/stats", get(preload_stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
