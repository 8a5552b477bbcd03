use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::counter::WaitlistCounter,
    use_cases::counter::CounterRepo,
};

/// The counter is a single row.
const COUNTER_ID: i32 = 1;

#[derive(sqlx::FromRow, Debug)]
struct CounterRow {
    base_offset: i64,
    count: i64,
    last_updated: Option<DateTime<Utc>>,
}

impl From<CounterRow> for WaitlistCounter {
    fn from(row: CounterRow) -> Self {
        WaitlistCounter {
            base_offset: u64::try_from(row.base_offset).unwrap_or_default(),
            count: u64::try_from(row.count).unwrap_or_default(),
            last_updated: row.last_updated,
        }
    }
}

fn offset_param(base_offset: u64) -> AppResult<i64> {
    i64::try_from(base_offset)
        .map_err(|_| AppError::Internal("Counter base offset out of range".into()))
}

#[async_trait]
impl CounterRepo for PostgresPersistence {
    async fn get_or_init(&self, base_offset: u64) -> AppResult<WaitlistCounter> {
        sqlx::query(
            "INSERT INTO waitlist_counter (id, base_offset, count) VALUES ($1, $2, 0) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(COUNTER_ID)
        .bind(offset_param(base_offset)?)
        .execute(self.pool())
        .await
        .map_err(AppError::from)?;

        let row: CounterRow = sqlx::query_as(
            "SELECT base_offset, count, last_updated FROM waitlist_counter WHERE id = $1",
        )
        .bind(COUNTER_ID)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(row.into())
    }

    async fn increment(&self, base_offset: u64) -> AppResult<WaitlistCounter> {
        // One statement, so concurrent increments serialize on the row lock.
        let row: CounterRow = sqlx::query_as(
            "INSERT INTO waitlist_counter (id, base_offset, count, last_updated) \
             VALUES ($1, $2, 1, now()) \
             ON CONFLICT (id) DO UPDATE \
             SET count = waitlist_counter.count + 1, last_updated = now() \
             RETURNING base_offset, count, last_updated",
        )
        .bind(COUNTER_ID)
        .bind(offset_param(base_offset)?)
        .fetch_one(self.pool())
        .await
        .map_err(AppError::from)?;
        Ok(row.into())
    }
}
