//! Boost tracking for the interactive signup step.

use std::ops::RangeInclusive;

use rand::Rng;
use waitlist_types::{BoostAction, RegistrationRequest, SocialActions};

/// Range the preview rank is drawn from before any boost.
pub const PREVIEW_RANK_RANGE: RangeInclusive<u32> = 400..=499;

/// Each point of reward moves the preview rank up by `1 / RANK_STEP` places.
const RANK_STEP: u32 = 5;

/// Tracks completed boost actions and the rank shown while the user boosts.
///
/// The preview rank is display-only: the server draws the rank that is
/// persisted when the registration is submitted.
#[derive(Debug, Clone)]
pub struct BoostTracker {
    preview_rank: u32,
    actions: SocialActions,
}

impl Default for BoostTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl BoostTracker {
    pub fn new() -> Self {
        Self::with_rank(rand::thread_rng().gen_range(PREVIEW_RANK_RANGE))
    }

    pub fn with_rank(preview_rank: u32) -> Self {
        Self {
            preview_rank: preview_rank.max(1),
            actions: SocialActions::default(),
        }
    }

    /// Records a completed action.
    ///
    /// Returns the points awarded, or `None` if the action was already done.
    pub fn complete(&mut self, action: BoostAction) -> Option<u32> {
        if !self.actions.mark(action) {
            return None;
        }
        let reward = action.reward();
        self.preview_rank = self.preview_rank.saturating_sub(reward / RANK_STEP).max(1);
        Some(reward)
    }

    pub fn preview_rank(&self) -> u32 {
        self.preview_rank
    }

    pub fn points(&self) -> u32 {
        self.actions.points()
    }

    pub fn social_actions(&self) -> SocialActions {
        self.actions
    }

    pub fn all_completed(&self) -> bool {
        BoostAction::ALL.iter().all(|a| self.actions.has(*a))
    }

    /// Builds the registration body carrying the tracked actions.
    pub fn into_request(
        self,
        name: impl Into<String>,
        email: impl Into<String>,
        learning_skills: Vec<String>,
        teaching_skills: Vec<String>,
        wants_to_teach: bool,
    ) -> RegistrationRequest {
        RegistrationRequest {
            name: name.into(),
            email: email.into(),
            learning_skills,
            teaching_skills,
            wants_to_teach,
            points: Some(self.points()),
            social_actions: self.actions,
        }
    }
}
