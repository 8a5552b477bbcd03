use serde::{Deserialize, Serialize};

use crate::boost::SocialActions;

/// Body of `POST /api/waitlist`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub learning_skills: Vec<String>,
    #[serde(default)]
    pub teaching_skills: Vec<String>,
    #[serde(default)]
    pub wants_to_teach: bool,
    /// Client-side tally. The server recomputes points from `social_actions`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default)]
    pub social_actions: SocialActions,
}

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
}

/// Body of `POST /api/admin/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}
