//! Preload plans: which resources to warm for a given situation.

use std::time::Duration;

use crate::content::FeedType;
use crate::preload::{PreloadTarget, PreloadTask, Priority};

/// Delay before fetching related content on hover.
pub const RELATED_DELAY: Duration = Duration::from_secs(1);

fn trending(feed: FeedType, limit: usize, priority: Priority) -> PreloadTask {
    PreloadTask::new(PreloadTarget::Trending { feed, limit }, priority)
}

fn library(feed: FeedType, limit: usize, priority: Priority) -> PreloadTask {
    PreloadTask::new(PreloadTarget::Library { feed, limit }, priority)
}

/// Resources worth having warm on every session start.
pub fn essential_tasks() -> Vec<PreloadTask> {
    vec![
        trending(FeedType::Trending, 10, Priority::High),
        library(FeedType::All, 20, Priority::High),
        trending(FeedType::New, 10, Priority::Medium),
        trending(FeedType::Podcasts, 10, Priority::Medium),
    ]
}

/// Routing table keyed by pathname. Unknown pages preload nothing.
pub fn tasks_for_page(path: &str) -> Vec<PreloadTask> {
    match path.trim_end_matches('/') {
        "" => vec![
            trending(FeedType::Trending, 10, Priority::High),
            trending(FeedType::New, 10, Priority::Medium),
            trending(FeedType::Podcasts, 10, Priority::Low),
        ],
        "/dashboard" => vec![
            library(FeedType::All, 20, Priority::High),
            trending(FeedType::Trending, 5, Priority::Medium),
        ],
        "/library" => vec![
            library(FeedType::All, 20, Priority::High),
            library(FeedType::Videos, 20, Priority::Medium),
            library(FeedType::Podcasts, 20, Priority::Low),
            library(FeedType::Documents, 20, Priority::Low),
        ],
        _ => Vec::new(),
    }
}

/// Hover prefetch for content related to `id`.
pub fn related_task(id: &str, category: Option<&str>) -> PreloadTask {
    PreloadTask::new(
        PreloadTarget::Related {
            id: id.to_string(),
            category: category.map(str::to_string),
        },
        Priority::Medium,
    )
    .with_delay(RELATED_DELAY)
}

/// Placeholder thumbnails are never worth fetching.
pub fn is_placeholder(url: &str) -> bool {
    let url = url.trim();
    url.is_empty() || url.contains("placeholder")
}

/// Low-priority raw GETs for each real image URL.
pub fn image_tasks<I, S>(urls: I) -> Vec<PreloadTask>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    urls.into_iter()
        .filter(|url| !is_placeholder(url.as_ref()))
        .map(|url| {
            PreloadTask::new(
                PreloadTarget::Url(url.as_ref().trim().to_string()),
                Priority::Low,
            )
        })
        .collect()
}
