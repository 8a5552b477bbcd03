use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use waitlist_types::SocialActions;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
    use_cases::registration::WaitlistRepo,
};

const ENTRY_COLUMNS: &str = "id, name, email, learning_skills, teaching_skills, wants_to_teach, \
     waitlist_rank, points, shared_twitter, joined_discord, invited_friends, created_at, \
     email_sent, email_id";

// Entry as stored in the db.
#[derive(sqlx::FromRow, Debug)]
struct WaitlistEntryRow {
    id: Uuid,
    name: String,
    email: String,
    learning_skills: Vec<String>,
    teaching_skills: Vec<String>,
    wants_to_teach: bool,
    waitlist_rank: i32,
    points: i32,
    shared_twitter: bool,
    joined_discord: bool,
    invited_friends: bool,
    created_at: DateTime<Utc>,
    email_sent: bool,
    email_id: Option<String>,
}

impl From<WaitlistEntryRow> for WaitlistEntry {
    fn from(row: WaitlistEntryRow) -> Self {
        WaitlistEntry {
            id: row.id,
            name: row.name,
            email: row.email,
            learning_skills: row.learning_skills,
            teaching_skills: row.teaching_skills,
            wants_to_teach: row.wants_to_teach,
            // Both columns carry CHECK (>= 0).
            waitlist_rank: u32::try_from(row.waitlist_rank).unwrap_or_default(),
            points: u32::try_from(row.points).unwrap_or_default(),
            social_actions: SocialActions {
                shared_twitter: row.shared_twitter,
                joined_discord: row.joined_discord,
                invited_friends: row.invited_friends,
            },
            created_at: row.created_at,
            email_sent: row.email_sent,
            email_id: row.email_id,
        }
    }
}

fn to_i32(value: u32, field: &str) -> AppResult<i32> {
    i32::try_from(value).map_err(|_| AppError::InvalidInput(format!("{field} is out of range")))
}

#[async_trait]
impl WaitlistRepo for PostgresPersistence {
    async fn insert(&self, entry: NewWaitlistEntry) -> AppResult<WaitlistEntry> {
        let rank = to_i32(entry.waitlist_rank, "waitlist_rank")?;
        let points = to_i32(entry.points, "points")?;
        let sql = format!(
            "INSERT INTO waitlist_entries \
             (id, name, email, learning_skills, teaching_skills, wants_to_teach, \
              waitlist_rank, points, shared_twitter, joined_discord, invited_friends, \
              email_sent, email_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, TRUE, $12) \
             RETURNING {ENTRY_COLUMNS}"
        );
        let row: WaitlistEntryRow = sqlx::query_as(&sql)
            .bind(Uuid::new_v4())
            .bind(&entry.name)
            .bind(&entry.email)
            .bind(&entry.learning_skills)
            .bind(&entry.teaching_skills)
            .bind(entry.wants_to_teach)
            .bind(rank)
            .bind(points)
            .bind(entry.social_actions.shared_twitter)
            .bind(entry.social_actions.joined_discord)
            .bind(entry.social_actions.invited_friends)
            .bind(&entry.email_id)
            .fetch_one(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(row.into())
    }

    async fn list_all(&self) -> AppResult<Vec<WaitlistEntry>> {
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM waitlist_entries ORDER BY waitlist_rank ASC, created_at ASC"
        );
        let rows: Vec<WaitlistEntryRow> = sqlx::query_as(&sql)
            .fetch_all(self.pool())
            .await
            .map_err(AppError::from)?;
        Ok(rows.into_iter().map(WaitlistEntry::from).collect())
    }
}
