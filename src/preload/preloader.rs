//! Preloader
//!
//! Best-effort background warming of the content cache. Tasks are drained
//! one at a time in priority order by a single tokio task that exists only
//! while there is work queued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::content::ContentCache;
use crate::error::Result;
use crate::preload::plan::{essential_tasks, image_tasks, related_task, tasks_for_page};
use crate::preload::{PreloadQueue, PreloadTarget, PreloadTask};

/// Whether a drain worker is currently running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreloaderState {
    Idle,
    Processing,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreloadStats {
    pub state: PreloaderState,
    pub queued: usize,
    pub completed: u64,
    pub failed: u64,
}

#[derive(Default)]
struct QueueState {
    queue: PreloadQueue,
    processing: bool,
}

struct Inner {
    content: ContentCache,
    state: Mutex<QueueState>,
    idle: Notify,
    completed: AtomicU64,
    failed: AtomicU64,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// == Preloader ==
/// Cloneable handle to one preload queue and its worker.
#[derive(Clone)]
pub struct Preloader {
    inner: Arc<Inner>,
}

impl Preloader {
    pub fn new(content: ContentCache) -> Self {
        Self {
            inner: Arc::new(Inner {
                content,
                state: Mutex::new(QueueState::default()),
                idle: Notify::new(),
                completed: AtomicU64::new(0),
                failed: AtomicU64::new(0),
            }),
        }
    }

    // == Add To Queue ==
    /// Enqueues tasks and starts the drain worker if none is running.
    ///
    /// Must be called from within a tokio runtime. Returns the number of
    /// tasks added.
    pub fn add_to_queue<I>(&self, tasks: I) -> usize
    where
        I: IntoIterator<Item = PreloadTask>,
    {
        let (added, start_worker) = {
            let mut state = self.inner.lock();
            let before = state.queue.len();
            state.queue.extend(tasks);
            let added = state.queue.len() - before;

            let start_worker = added > 0 && !state.processing;
            if start_worker {
                state.processing = true;
            }
            (added, start_worker)
        };

        if start_worker {
            debug!("preload worker starting");
            tokio::spawn(drain(Arc::clone(&self.inner)));
        }
        added
    }

    /// Warms the resources every session needs.
    pub fn preload_essential_content(&self) -> usize {
        self.add_to_queue(essential_tasks())
    }

    /// Warms related content after a short delay (card hover).
    pub fn preload_related_content(&self, content_id: &str, category: Option<&str>) -> usize {
        self.add_to_queue([related_task(content_id, category)])
    }

    /// Warms what the user is likely to open next from `current_page`.
    pub fn preload_by_user_behavior(&self, current_page: &str) -> usize {
        self.add_to_queue(tasks_for_page(current_page))
    }

    /// Fetches real (non-placeholder) image URLs at low priority.
    ///
    /// URLs outside the API's origin are dropped, not queued.
    pub fn preload_images<I, S>(&self, urls: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let transport = self.inner.content.transport();
        let tasks = image_tasks(urls).into_iter().filter(|task| {
            let url = task.url();
            let accepted = transport.accepts(&url);
            if !accepted {
                warn!(%url, "off-origin image preload dropped");
            }
            accepted
        });
        self.add_to_queue(tasks)
    }

    // == Introspection ==
    pub fn state(&self) -> PreloaderState {
        if self.inner.lock().processing {
            PreloaderState::Processing
        } else {
            PreloaderState::Idle
        }
    }

    pub fn stats(&self) -> PreloadStats {
        let (state, queued) = {
            let guard = self.inner.lock();
            let state = if guard.processing {
                PreloaderState::Processing
            } else {
                PreloaderState::Idle
            };
            (state, guard.queue.len())
        };
        PreloadStats {
            state,
            queued,
            completed: self.inner.completed.load(Ordering::Relaxed),
            failed: self.inner.failed.load(Ordering::Relaxed),
        }
    }

    /// Resolves once the queue is empty and the worker has stopped.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.inner.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.state() == PreloaderState::Idle {
                return;
            }
            notified.await;
        }
    }
}

// == Drain Loop ==
async fn drain(inner: Arc<Inner>) {
    loop {
        let next = {
            let mut state = inner.lock();
            match state.queue.pop() {
                Some(task) => task,
                None => {
                    state.processing = false;
                    break;
                }
            }
        };

        if let Some(delay) = next.delay {
            tokio::time::sleep(delay).await;
        }

        let url = next.url();
        match execute(&inner.content, &next.target).await {
            Ok(()) => {
                inner.completed.fetch_add(1, Ordering::Relaxed);
                debug!(%url, priority = ?next.priority, "preloaded");
            }
            Err(e) => {
                inner.failed.fetch_add(1, Ordering::Relaxed);
                warn!(%url, error = %e, "preload failed");
            }
        }
    }

    info!(
        completed = inner.completed.load(Ordering::Relaxed),
        failed = inner.failed.load(Ordering::Relaxed),
        "preload queue drained"
    );
    inner.idle.notify_waiters();
}

async fn execute(content: &ContentCache, target: &PreloadTarget) -> Result<()> {
    match target {
        PreloadTarget::Trending { feed, limit } => {
            content.get_trending_content(*feed, *limit).await?;
        }
        PreloadTarget::Library { feed, limit } => {
            content.get_library_content(*feed, *limit).await?;
        }
        PreloadTarget::Content { id } => {
            content.get_content_by_id(id).await?;
        }
        PreloadTarget::Related { .. } | PreloadTarget::Url(_) => {
            content.transport().warm(&target.url()).await?;
        }
    }
    Ok(())
}
