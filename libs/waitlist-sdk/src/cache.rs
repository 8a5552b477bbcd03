//! Local cache for the last known waitlist count.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WaitlistSdkError;

/// A count together with the moment it was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedCount {
    pub value: u64,
    pub fetched_at: DateTime<Utc>,
}

impl CachedCount {
    pub fn now(value: u64) -> Self {
        Self {
            value,
            fetched_at: Utc::now(),
        }
    }
}

/// Whether a cached value recorded at `fetched_at` is too old to display.
///
/// A value exactly `max_age` old is still fresh. Timestamps in the future
/// (clock skew) count as fresh.
pub fn is_stale(now: DateTime<Utc>, fetched_at: DateTime<Utc>, max_age: Duration) -> bool {
    match (now - fetched_at).to_std() {
        Ok(age) => age > max_age,
        Err(_) => false,
    }
}

#[async_trait]
pub trait CountCache: Send + Sync {
    async fn load(&self) -> Result<Option<CachedCount>, WaitlistSdkError>;
    async fn store(&self, entry: CachedCount) -> Result<(), WaitlistSdkError>;
}

/// Process-local cache.
#[derive(Debug, Default)]
pub struct MemoryCountCache {
    entry: Mutex<Option<CachedCount>>,
}

impl MemoryCountCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(entry: CachedCount) -> Self {
        Self {
            entry: Mutex::new(Some(entry)),
        }
    }

    pub fn snapshot(&self) -> Option<CachedCount> {
        *self.entry.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl CountCache for MemoryCountCache {
    async fn load(&self) -> Result<Option<CachedCount>, WaitlistSdkError> {
        Ok(self.snapshot())
    }

    async fn store(&self, entry: CachedCount) -> Result<(), WaitlistSdkError> {
        *self.entry.lock().unwrap_or_else(|e| e.into_inner()) = Some(entry);
        Ok(())
    }
}

/// JSON file cache that survives restarts.
#[derive(Debug, Clone)]
pub struct FileCountCache {
    path: PathBuf,
}

impl FileCountCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CountCache for FileCountCache {
    async fn load(&self) -> Result<Option<CachedCount>, WaitlistSdkError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    async fn store(&self, entry: CachedCount) -> Result<(), WaitlistSdkError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_vec(&entry)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}
