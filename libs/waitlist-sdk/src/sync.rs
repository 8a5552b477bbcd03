//! Client-side synchronisation of the displayed waitlist count.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::cache::{CachedCount, CountCache, is_stale};
use crate::error::WaitlistSdkError;

/// Server side of the count: read the aggregate, or atomically bump it.
#[async_trait]
pub trait CountSource: Send + Sync {
    async fn fetch_count(&self) -> Result<u64, WaitlistSdkError>;
    async fn increment_count(&self) -> Result<u64, WaitlistSdkError>;
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Shown when nothing better is known.
    pub default_floor: u64,
    /// How often `start_polling` refreshes.
    pub poll_interval: Duration,
    /// Cached values older than this are ignored on load.
    pub max_cache_age: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_floor: 3119,
            poll_interval: Duration::from_secs(5 * 60),
            max_cache_age: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Keeps a single "people on the waitlist" number for display.
///
/// Sources, best first: an optimistic local increment, a fresh cached
/// value, the server aggregate, the configured floor. The displayed value
/// never goes down, and no failure is ever surfaced to the caller.
pub struct CountSynchronizer {
    source: Arc<dyn CountSource>,
    cache: Arc<dyn CountCache>,
    config: SyncConfig,
    displayed: AtomicU64,
}

impl CountSynchronizer {
    pub fn new(
        source: Arc<dyn CountSource>,
        cache: Arc<dyn CountCache>,
        config: SyncConfig,
    ) -> Self {
        let displayed = AtomicU64::new(config.default_floor);
        Self {
            source,
            cache,
            config,
            displayed,
        }
    }

    /// Best locally known value. Never performs I/O.
    pub fn get_count(&self) -> u64 {
        self.displayed.load(Ordering::SeqCst)
    }

    /// Seeds the display from the local cache if it is fresh.
    pub async fn load(&self) -> u64 {
        self.load_at(Utc::now()).await
    }

    pub async fn load_at(&self, now: DateTime<Utc>) -> u64 {
        match self.cache.load().await {
            Ok(Some(cached)) if !is_stale(now, cached.fetched_at, self.config.max_cache_age) => {
                self.adopt(cached.value);
            }
            Ok(Some(cached)) => {
                tracing::debug!(fetched_at = %cached.fetched_at, "ignoring stale cached count");
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "failed to read cached waitlist count"),
        }
        self.get_count()
    }

    /// Pulls the server aggregate and adopts it unless it is lower.
    pub async fn refresh(&self) -> u64 {
        match self.source.fetch_count().await {
            Ok(server) => {
                let shown = self.adopt(server);
                if server < shown {
                    tracing::debug!(server, shown, "server count behind display; keeping display");
                }
                self.persist().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "waitlist count refresh failed; keeping last known value")
            }
        }
        self.get_count()
    }

    /// Bumps the display right away, then asks the server to record it.
    pub async fn increment(&self) -> u64 {
        self.displayed.fetch_add(1, Ordering::SeqCst);
        self.persist().await;

        match self.source.increment_count().await {
            Ok(server) => {
                let before = self.get_count();
                if self.adopt(server) > before {
                    self.persist().await;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "waitlist count increment failed; keeping optimistic value")
            }
        }
        self.get_count()
    }

    /// Refreshes now and then every `poll_interval` until the handle drops.
    pub fn start_polling(self: &Arc<Self>) -> PollHandle {
        let this = Arc::clone(self);
        let every = self.config.poll_interval;
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                this.refresh().await;
            }
        });
        PollHandle { task }
    }

    fn adopt(&self, candidate: u64) -> u64 {
        let previous = self.displayed.fetch_max(candidate, Ordering::SeqCst);
        previous.max(candidate)
    }

    /// Writes the displayed value to the cache. A concurrent caller may have
    /// raised the display while this write was in flight; the write is
    /// repeated until the cache is not behind the display.
    async fn persist(&self) {
        let mut value = self.get_count();
        loop {
            if let Err(e) = self.cache.store(CachedCount::now(value)).await {
                tracing::warn!(error = %e, "failed to cache waitlist count");
                return;
            }
            let current = self.get_count();
            if current <= value {
                return;
            }
            value = current;
        }
    }
}

/// Running poll loop. Dropping it stops the loop.
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
