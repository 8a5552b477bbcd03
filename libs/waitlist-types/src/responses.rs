use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::boost::SocialActions;

/// Outcome of `POST /api/waitlist`.
///
/// Both variants are returned with status 200. `Partial` means the
/// confirmation email went out but the entry could not be stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RegistrationResponse {
    #[serde(rename_all = "camelCase")]
    Success {
        success: bool,
        entry_id: Uuid,
        email_id: String,
        rank: u32,
        points: u32,
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    Partial {
        partial_success: bool,
        email_id: String,
        rank: u32,
        points: u32,
        message: String,
        error: String,
    },
}

impl RegistrationResponse {
    pub fn rank(&self) -> u32 {
        match self {
            Self::Success { rank, .. } | Self::Partial { rank, .. } => *rank,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Body of `GET /api/waitlist/count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /api/waitlist/count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrementResponse {
    pub count: u64,
    pub success: bool,
}

/// A waitlist entry as shown in the admin table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistEntryView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub waitlist_rank: u32,
    pub created_at: DateTime<Utc>,
    pub learning_skills: Vec<String>,
    pub teaching_skills: Vec<String>,
    pub wants_to_teach: bool,
    pub points: u32,
    pub social_actions: SocialActions,
    pub email_sent: bool,
    pub email_id: Option<String>,
}

/// Body of `GET /api/admin/waitlist`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminWaitlistResponse {
    pub waitlist: Vec<WaitlistEntryView>,
}

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success: bool,
    pub message_id: String,
}
