use chrono::{DateTime, Utc};
use uuid::Uuid;
use waitlist_types::{SocialActions, WaitlistEntryView};

/// A stored waitlist signup. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub learning_skills: Vec<String>,
    pub teaching_skills: Vec<String>,
    pub wants_to_teach: bool,
    pub waitlist_rank: u32,
    pub points: u32,
    pub social_actions: SocialActions,
    pub created_at: DateTime<Utc>,
    pub email_sent: bool,
    pub email_id: Option<String>,
}

/// Fields for a new entry; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewWaitlistEntry {
    pub name: String,
    pub email: String,
    pub learning_skills: Vec<String>,
    pub teaching_skills: Vec<String>,
    pub wants_to_teach: bool,
    pub waitlist_rank: u32,
    pub points: u32,
    pub social_actions: SocialActions,
    pub email_id: String,
}

impl NewWaitlistEntry {
    pub fn into_entry(self, id: Uuid, created_at: DateTime<Utc>) -> WaitlistEntry {
        WaitlistEntry {
            id,
            name: self.name,
            email: self.email,
            learning_skills: self.learning_skills,
            teaching_skills: self.teaching_skills,
            wants_to_teach: self.wants_to_teach,
            waitlist_rank: self.waitlist_rank,
            points: self.points,
            social_actions: self.social_actions,
            created_at,
            email_sent: true,
            email_id: Some(self.email_id),
        }
    }
}

impl From<WaitlistEntry> for WaitlistEntryView {
    fn from(entry: WaitlistEntry) -> Self {
        WaitlistEntryView {
            id: entry.id,
            name: entry.name,
            email: entry.email,
            waitlist_rank: entry.waitlist_rank,
            created_at: entry.created_at,
            learning_skills: entry.learning_skills,
            teaching_skills: entry.teaching_skills,
            wants_to_teach: entry.wants_to_teach,
            points: entry.points,
            social_actions: entry.social_actions,
            email_sent: entry.email_sent,
            email_id: entry.email_id,
        }
    }
}

/// Orders entries by rank, oldest first among equal ranks.
pub fn sort_by_rank(entries: &mut [WaitlistEntry]) {
    entries.sort_by(|a, b| {
        a.waitlist_rank
            .cmp(&b.waitlist_rank)
            .then(a.created_at.cmp(&b.created_at))
    });
}
