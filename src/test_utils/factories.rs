//! Test data factories.
//!
//! Each factory returns a complete, valid object. Use the closure to override fields.

use chrono::{TimeZone, Utc};
use uuid::Uuid;
use waitlist_types::{RegistrationRequest, SocialActions};

use crate::domain::entities::waitlist_entry::WaitlistEntry;

/// Create a stored waitlist entry with sensible defaults.
pub fn create_test_entry(overrides: impl FnOnce(&mut WaitlistEntry)) -> WaitlistEntry {
    let mut entry = WaitlistEntry {
        id: Uuid::new_v4(),
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        learning_skills: vec!["Python".to_string()],
        teaching_skills: vec![],
        wants_to_teach: false,
        waitlist_rank: 3500,
        points: 0,
        social_actions: SocialActions::default(),
        created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        email_sent: true,
        email_id: Some("email_test_1".to_string()),
    };
    overrides(&mut entry);
    entry
}

/// Create a valid registration request with sensible defaults.
pub fn create_test_registration(
    overrides: impl FnOnce(&mut RegistrationRequest),
) -> RegistrationRequest {
    let mut req = RegistrationRequest {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        learning_skills: vec!["Python".to_string()],
        teaching_skills: vec![],
        wants_to_teach: false,
        points: None,
        social_actions: SocialActions::default(),
    };
    overrides(&mut req);
    req
}
