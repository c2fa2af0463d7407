//! Cache Module
//!
//! Provides in-memory caching with per-entry TTL expiration and a
//! get-or-populate wrapper shared across tasks.

mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// Default TTL applied when a caller does not pass one (5 minutes)
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;

/// Default interval between expired-entry sweeps (10 minutes)
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 10 * 60;
