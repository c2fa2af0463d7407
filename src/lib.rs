//! Wakademy Cache - content cache and preloader for the Wakademy library
//!
//! Provides a TTL cache with get-or-populate semantics, typed accessors for
//! the content API, and a priority-ordered preloader that warms the cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod models;
pub mod preload;
pub mod tasks;

pub use api::AppState;
pub use cache::{SharedCache, TtlCache};
pub use config::Config;
pub use content::ContentCache;
pub use error::{CacheError, Result};
pub use preload::Preloader;
pub use tasks::spawn_cleanup_task;
