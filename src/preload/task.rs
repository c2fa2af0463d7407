//! Preload Task Module
//!
//! What to prefetch, how urgently, and after how long.

use std::time::Duration;

use serde::Serialize;

use crate::content::paths::{content_url, library_url, related_url, trending_url};
use crate::content::FeedType;

// == Priority ==
/// Processing order: `High` drains before `Medium` before `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank, lower drains first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

// == Preload Target ==
/// The resource a task prefetches.
///
/// Facade-shaped targets go through the content cache so the TTL cache is
/// warmed; `Related` and `Url` are plain GETs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreloadTarget {
    Trending { feed: FeedType, limit: usize },
    Library { feed: FeedType, limit: usize },
    Content { id: String },
    Related { id: String, category: Option<String> },
    Url(String),
}

impl PreloadTarget {
    /// Same-origin API path (or raw URL) this target fetches.
    pub fn url(&self) -> String {
        match self {
            PreloadTarget::Trending { feed, limit } => trending_url(*feed, *limit),
            PreloadTarget::Library { feed, limit } => library_url(*feed, *limit),
            PreloadTarget::Content { id } => content_url(id),
            PreloadTarget::Related { id, category } => related_url(id, category.as_deref()),
            PreloadTarget::Url(url) => url.clone(),
        }
    }
}

// == Preload Task ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadTask {
    pub target: PreloadTarget,
    pub priority: Priority,
    /// Wait this long immediately before fetching
    pub delay: Option<Duration>,
}

impl PreloadTask {
    pub fn new(target: PreloadTarget, priority: Priority) -> Self {
        Self {
            target,
            priority,
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn url(&self) -> String {
        self.target.url()
    }
}
