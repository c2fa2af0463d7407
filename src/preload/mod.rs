//! Preload Module
//!
//! Priority-ordered prefetching that warms the content cache ahead of
//! navigation. Failures are logged and never reach the caller.

pub mod plan;
mod preloader;
mod queue;
mod task;

pub use preloader::{PreloadStats, Preloader, PreloaderState};
pub use queue::PreloadQueue;
pub use task::{PreloadTarget, PreloadTask, Priority};
