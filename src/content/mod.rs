//! Content Module
//!
//! Typed Wakademy content models, the upstream API transport, and the
//! cached facade built on [`SharedCache`](crate::cache::SharedCache).

mod facade;
mod models;
pub mod paths;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use facade::{
    ContentCache, CONTENT_TTL_MS, DEFAULT_LIBRARY_LIMIT, DEFAULT_TRENDING_LIMIT, LIBRARY_TTL_MS,
    TRENDING_TTL_MS,
};
pub use models::{ContentDetail, ContentKind, ContentPayload, ContentSummary, FeedResponse, FeedType};
pub use paths::LibraryQuery;
pub use transport::{ApiTransport, HttpTransport};
