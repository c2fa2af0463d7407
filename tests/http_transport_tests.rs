//! Integration Tests for the reqwest-backed transport
//!
//! Runs a stand-in Wakademy API on an ephemeral port and drives the content
//! cache against it over real HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use wakademy_cache::content::{ApiTransport, FeedType, HttpTransport};
use wakademy_cache::{CacheError, ContentCache, SharedCache};

#[derive(Clone, Default)]
struct Upstream {
    hits: Arc<AtomicUsize>,
}

#[derive(Deserialize)]
struct FeedQuery {
    #[serde(rename = "type")]
    feed: String,
    limit: usize,
}

async fn trending(State(upstream): State<Upstream>, Query(q): Query<FeedQuery>) -> Json<Value> {
    upstream.hits.fetch_add(1, Ordering::SeqCst);
    let data: Vec<Value> = (0..q.limit.min(3))
        .map(|i| json!({"id": format!("{}-{}", q.feed, i), "title": "Intro", "type": "video"}))
        .collect();
    Json(json!({"data": data, "cached": false, "timestamp": chrono::Utc::now().to_rfc3339()}))
}

async fn content(
    State(upstream): State<Upstream>,
    Path(id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    upstream.hits.fetch_add(1, Ordering::SeqCst);
    match id.as_str() {
        "c1" => Ok(Json(json!({"id": "c1", "title": "Handbook", "type": "document"}))),
        "intro video/2+" => Ok(Json(json!({"id": id, "title": "Encoded", "type": "video"}))),
        "broken" => Err(StatusCode::INTERNAL_SERVER_ERROR),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn garbage() -> &'static str {
    "<html>not json</html>"
}

async fn spawn_upstream() -> (String, Upstream) {
    let upstream = Upstream::default();
    let app = Router::new()
        .route("/api/trending", get(trending))
        .route("/api/content/:id", get(content))
        .route("/api/garbage", get(garbage))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), upstream)
}

#[tokio::test]
async fn test_get_json_over_http() {
    let (base_url, _) = spawn_upstream().await;
    let transport = HttpTransport::new(&base_url).unwrap();

    let body = transport
        .get_json("/api/trending?type=new&limit=2")
        .await
        .unwrap();

    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["id"], "new-0");
}

#[tokio::test]
async fn test_non_success_status_is_upstream_error() {
    let (base_url, _) = spawn_upstream().await;
    let transport = HttpTransport::new(&base_url).unwrap();

    let err = transport.get_json("/api/content/missing").await.unwrap_err();
    assert!(matches!(err, CacheError::Upstream { status: 404, .. }));

    let err = transport.warm("/api/content/broken").await.unwrap_err();
    assert!(matches!(err, CacheError::Upstream { status: 500, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    let (base_url, _) = spawn_upstream().await;
    let transport = HttpTransport::new(&base_url).unwrap();

    let err = transport.get_json("/api/garbage").await.unwrap_err();
    assert!(matches!(err, CacheError::Json(_)));
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(&format!("http://{}", addr)).unwrap();
    let err = transport.get_json("/api/trending").await.unwrap_err();
    assert!(matches!(err, CacheError::Http(_)));
}

#[tokio::test]
async fn test_off_origin_urls_are_refused_without_a_request() {
    let (base_url, upstream) = spawn_upstream().await;
    let transport = HttpTransport::new(&base_url).unwrap();

    let err = transport
        .warm("http://169.254.169.254/latest/meta-data/")
        .await
        .unwrap_err();
    assert!(matches!(err, CacheError::InvalidRequest(_)));
    assert!(!transport.accepts("http://10.0.0.5:6379/"));
    assert!(transport.accepts(&format!("{}/api/trending", base_url)));
    assert_eq!(upstream.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_content_id_reaches_upstream_unchanged() {
    let (base_url, upstream) = spawn_upstream().await;
    let transport = Arc::new(HttpTransport::new(&base_url).unwrap());
    let content = ContentCache::new(SharedCache::default(), transport);

    let detail = content.get_content_by_id("intro video/2+").await.unwrap();

    assert_eq!(detail.summary.id, "intro video/2+");
    assert_eq!(detail.summary.title, "Encoded");
    assert_eq!(upstream.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_trending_twice_is_one_network_call() {
    let (base_url, upstream) = spawn_upstream().await;
    let transport = Arc::new(HttpTransport::new(&base_url).unwrap());
    let content = ContentCache::new(SharedCache::default(), transport);

    let first = content
        .get_trending_content(FeedType::Trending, 10)
        .await
        .unwrap();
    let second = content
        .get_trending_content(FeedType::Trending, 10)
        .await
        .unwrap();

    assert_eq!(first.data, second.data);
    assert!(!first.cached && second.cached);
    assert_eq!(upstream.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_content_detail_failure_then_success() {
    let (base_url, upstream) = spawn_upstream().await;
    let transport = Arc::new(HttpTransport::new(&base_url).unwrap());
    let content = ContentCache::new(SharedCache::default(), transport);

    assert!(content.get_content_by_id("broken").await.is_err());
    assert!(content.cache().is_empty().await);

    let detail = content.get_content_by_id("c1").await.unwrap();
    assert_eq!(detail.summary.title, "Handbook");
    content.get_content_by_id("c1").await.unwrap();

    assert_eq!(upstream.hits.load(Ordering::SeqCst), 2);
}
