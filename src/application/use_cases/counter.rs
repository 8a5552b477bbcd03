use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::{app_error::AppResult, domain::entities::counter::WaitlistCounter};

#[async_trait]
pub trait CounterRepo: Send + Sync {
    /// Reads the counter, seeding it with `base_offset` when it does not exist yet.
    async fn get_or_init(&self, base_offset: u64) -> AppResult<WaitlistCounter>;
    /// Adds one in a single atomic step, seeding first if needed.
    async fn increment(&self, base_offset: u64) -> AppResult<WaitlistCounter>;
}

#[derive(Clone)]
pub struct CounterUseCases {
    repo: Arc<dyn CounterRepo>,
    base_offset: u64,
}

impl CounterUseCases {
    pub fn new(repo: Arc<dyn CounterRepo>, base_offset: u64) -> Self {
        Self { repo, base_offset }
    }

    /// Value reported when the store can't be read.
    pub fn floor(&self) -> u64 {
        self.base_offset
    }

    #[instrument(skip(self))]
    pub async fn current(&self) -> AppResult<WaitlistCounter> {
        self.repo.get_or_init(self.base_offset).await
    }

    #[instrument(skip(self))]
    pub async fn increment(&self) -> AppResult<WaitlistCounter> {
        let counter = self.repo.increment(self.base_offset).await?;
        tracing::info!(count = counter.displayed(), "Waitlist counter incremented");
        Ok(counter)
    }
}
