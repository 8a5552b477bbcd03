use chrono::{DateTime, Utc};

/// Singleton aggregate behind the public "people on the waitlist" number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitlistCounter {
    /// Seed value the public number starts from.
    pub base_offset: u64,
    /// Increments recorded since seeding.
    pub count: u64,
    pub last_updated: Option<DateTime<Utc>>,
}

impl WaitlistCounter {
    pub fn seeded(base_offset: u64) -> Self {
        Self {
            base_offset,
            count: 0,
            last_updated: None,
        }
    }

    pub fn displayed(&self) -> u64 {
        self.base_offset.saturating_add(self.count)
    }
}
