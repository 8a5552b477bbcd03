//! In-memory implementations of the application ports.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        ranking::RankSource,
        use_cases::{
            counter::CounterRepo,
            registration::{EmailSender, WaitlistRepo},
        },
    },
    domain::entities::{
        counter::WaitlistCounter,
        waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
    },
};

// ============================================================================
// InMemoryWaitlistRepo
// ============================================================================

/// In-memory implementation of WaitlistRepo for testing.
#[derive(Default)]
pub struct InMemoryWaitlistRepo {
    pub entries: Mutex<HashMap<Uuid, WaitlistEntry>>,
    failing: AtomicBool,
}

impl InMemoryWaitlistRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repo with initial entries.
    pub fn with_entries(entries: Vec<WaitlistEntry>) -> Self {
        let map: HashMap<Uuid, WaitlistEntry> = entries.into_iter().map(|e| (e.id, e)).collect();
        Self {
            entries: Mutex::new(map),
            failing: AtomicBool::new(false),
        }
    }

    /// Make every call fail as if the database were unreachable.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get all entries (for test assertions).
    pub fn get_all(&self) -> Vec<WaitlistEntry> {
        self.entries.lock().unwrap().values().cloned().collect()
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::Unavailable);
        }
        Ok(())
    }
}

#[async_trait]
impl WaitlistRepo for InMemoryWaitlistRepo {
    async fn insert(&self, entry: NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        self.check()?;
        let entry = entry.into_entry(Uuid::new_v4(), Utc::now());
        self.entries
            .lock()
            .unwrap()
            .insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn list_all(&self) -> AppResult<Vec<WaitlistEntry>> {
        self.check()?;
        Ok(self.get_all())
    }
}

// ============================================================================
// InMemoryCounterRepo
// ============================================================================

/// In-memory counter. The mutex plays the role of the atomic upsert.
#[derive(Default)]
pub struct InMemoryCounterRepo {
    counter: Mutex<Option<WaitlistCounter>>,
    unavailable: AtomicBool,
}

impl InMemoryCounterRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counter(counter: WaitlistCounter) -> Self {
        Self {
            counter: Mutex::new(Some(counter)),
            unavailable: AtomicBool::new(false),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Current stored row, `None` if never seeded.
    pub fn snapshot(&self) -> Option<WaitlistCounter> {
        *self.counter.lock().unwrap()
    }

    fn check(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Unavailable);
        }
        Ok(())
    }
}

#[async_trait]
impl CounterRepo for InMemoryCounterRepo {
    async fn get_or_init(&self, base_offset: u64) -> AppResult<WaitlistCounter> {
        self.check()?;
        let mut guard = self.counter.lock().unwrap();
        Ok(*guard.get_or_insert_with(|| WaitlistCounter::seeded(base_offset)))
    }

    async fn increment(&self, base_offset: u64) -> AppResult<WaitlistCounter> {
        self.check()?;
        let mut guard = self.counter.lock().unwrap();
        let counter = guard.get_or_insert_with(|| WaitlistCounter::seeded(base_offset));
        counter.count += 1;
        counter.last_updated = Some(Utc::now());
        Ok(*counter)
    }
}

// ============================================================================
// InMemoryEmailSender
// ============================================================================

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub id: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Records sent emails instead of delivering them.
#[derive(Default)]
pub struct InMemoryEmailSender {
    sent: Mutex<Vec<SentEmail>>,
    failing: AtomicBool,
}

impl InMemoryEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for InMemoryEmailSender {
    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<String> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::EmailDelivery("provider rejected message".into()));
        }
        let mut sent = self.sent.lock().unwrap();
        let id = format!("email_test_{}", sent.len() + 1);
        sent.push(SentEmail {
            id: id.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(id)
    }
}

// ============================================================================
// FixedRankSource
// ============================================================================

/// Always draws the same value, so assigned ranks are predictable.
pub struct FixedRankSource(pub u32);

impl RankSource for FixedRankSource {
    fn draw(&self, _min: u32, _max: u32) -> u32 {
        self.0
    }
}

// ============================================================================
// InMemoryRateLimiter
// ============================================================================

/// In-memory rate limiter for testing.
pub struct InMemoryRateLimiter {
    counts: Mutex<HashMap<String, u64>>,
    max_per_ip: u64,
    unavailable: AtomicBool,
}

impl InMemoryRateLimiter {
    pub fn new(max_per_ip: u64) -> Self {
        Self {
            counts: Mutex::new(HashMap::new()),
            max_per_ip,
            unavailable: AtomicBool::new(false),
        }
    }

    /// Simulate the backing store being unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Create a permissive rate limiter that never blocks (for most tests).
    pub fn permissive() -> Self {
        Self::new(u64::MAX)
    }
}

#[async_trait]
impl crate::infra::RateLimiterTrait for InMemoryRateLimiter {
    async fn check(&self, ip: &str) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Internal("rate limiter store unreachable".into()));
        }
        let mut counts = self.counts.lock().unwrap();
        let count = counts.entry(format!("rate:ip:{ip}")).or_insert(0);
        *count += 1;
        if *count > self.max_per_ip {
            return Err(AppError::RateLimited);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::RateLimiterTrait;

    #[tokio::test]
    async fn test_rate_limiter_blocks_after_limit() {
        let limiter = InMemoryRateLimiter::new(2);
        limiter.check("10.0.0.1").await.unwrap();
        limiter.check("10.0.0.1").await.unwrap();
        assert!(matches!(
            limiter.check("10.0.0.1").await,
            Err(AppError::RateLimited)
        ));
        limiter.check("10.0.0.2").await.unwrap();
    }

    #[tokio::test]
    async fn test_counter_seeded_on_first_increment() {
        let repo = InMemoryCounterRepo::new();
        let counter = repo.increment(100).await.unwrap();
        assert_eq!(counter.displayed(), 101);
        assert!(counter.last_updated.is_some());
    }
}
