use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;
use waitlist_types::{RegistrationRequest, SocialActions};

use crate::{
    app_error::{AppError, AppResult},
    application::{
        email_templates::confirmation_email,
        ranking::{RankCalculator, RankPolicy},
        use_cases::counter::CounterUseCases,
        validators::{is_valid_email, normalize_skills},
    },
    domain::entities::waitlist_entry::{NewWaitlistEntry, WaitlistEntry},
};

pub const PARTIAL_SUCCESS_MESSAGE: &str =
    "Confirmation email sent but failed to add to waitlist database";
pub const SUCCESS_MESSAGE: &str = "Successfully added to waitlist and sent confirmation email";

#[async_trait]
pub trait WaitlistRepo: Send + Sync {
    async fn insert(&self, entry: NewWaitlistEntry) -> AppResult<WaitlistEntry>;
    async fn list_all(&self) -> AppResult<Vec<WaitlistEntry>>;
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends one HTML email and returns the provider's message id.
    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Success {
        entry_id: Uuid,
        email_id: String,
        rank: u32,
        points: u32,
    },
    /// Email went out but the entry could not be stored.
    PartialSuccess {
        email_id: String,
        rank: u32,
        points: u32,
        error: String,
    },
}

/// Request fields after trimming and normalisation.
#[derive(Debug, Clone)]
struct ValidRegistration {
    name: String,
    email: String,
    learning_skills: Vec<String>,
    teaching_skills: Vec<String>,
    wants_to_teach: bool,
    social_actions: SocialActions,
    claimed_points: Option<u32>,
}

fn validate(req: RegistrationRequest) -> AppResult<ValidRegistration> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Name is required".into()));
    }
    let email = req.email.trim().to_string();
    if !is_valid_email(&email) {
        return Err(AppError::InvalidInput("Invalid email format".into()));
    }
    let learning_skills = normalize_skills(&req.learning_skills);
    let teaching_skills = normalize_skills(&req.teaching_skills);
    if learning_skills.is_empty() && teaching_skills.is_empty() {
        return Err(AppError::InvalidInput(
            "At least one learning or teaching skill is required".into(),
        ));
    }
    Ok(ValidRegistration {
        name,
        email,
        learning_skills,
        teaching_skills,
        wants_to_teach: req.wants_to_teach,
        social_actions: req.social_actions,
        claimed_points: req.points,
    })
}

#[derive(Clone)]
pub struct RegistrationUseCases {
    repo: Arc<dyn WaitlistRepo>,
    email: Arc<dyn EmailSender>,
    counter: Arc<CounterUseCases>,
    ranks: RankCalculator,
    product_name: String,
    site_origin: String,
}

impl RegistrationUseCases {
    pub fn new(
        repo: Arc<dyn WaitlistRepo>,
        email: Arc<dyn EmailSender>,
        counter: Arc<CounterUseCases>,
        ranks: RankCalculator,
        product_name: String,
        site_origin: String,
    ) -> Self {
        Self {
            repo,
            email,
            counter,
            ranks,
            product_name,
            site_origin,
        }
    }

    /// Validates, emails the confirmation, then stores the entry.
    ///
    /// Nothing is stored if the email fails. A storage failure after the email
    /// went out is reported as [`RegistrationOutcome::PartialSuccess`].
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn register(&self, req: RegistrationRequest) -> AppResult<RegistrationOutcome> {
        let input = validate(req)?;

        let points = input.social_actions.points();
        if let Some(claimed) = input.claimed_points
            && claimed != points
        {
            tracing::debug!(claimed, points, "Ignoring client-submitted points");
        }

        let rank = self.ranks.assign(points, self.queue_len().await);

        let (subject, html) =
            confirmation_email(&self.product_name, &self.site_origin, &input.name, rank);
        let email_id = self
            .email
            .send(&input.email, &subject, &html)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Confirmation email failed");
                match e {
                    AppError::EmailDelivery(_) => e,
                    other => AppError::EmailDelivery(other.to_string()),
                }
            })?;

        let new_entry = NewWaitlistEntry {
            name: input.name,
            email: input.email,
            learning_skills: input.learning_skills,
            teaching_skills: input.teaching_skills,
            wants_to_teach: input.wants_to_teach,
            waitlist_rank: rank,
            points,
            social_actions: input.social_actions,
            email_id: email_id.clone(),
        };

        match self.repo.insert(new_entry).await {
            Ok(entry) => {
                tracing::info!(entry_id = %entry.id, rank, points, "Waitlist entry created");
                Ok(RegistrationOutcome::Success {
                    entry_id: entry.id,
                    email_id,
                    rank,
                    points,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, email_id = %email_id, "Failed to store waitlist entry");
                Ok(RegistrationOutcome::PartialSuccess {
                    email_id,
                    rank,
                    points,
                    error: "Failed to save waitlist entry".to_string(),
                })
            }
        }
    }

    async fn queue_len(&self) -> Option<u64> {
        if self.ranks.policy() != RankPolicy::ArrivalOrder {
            return None;
        }
        match self.counter.current().await {
            Ok(counter) => Some(counter.displayed()),
            Err(e) => {
                tracing::warn!(error = %e, "Counter unavailable, using lowest rank");
                None
            }
        }
    }
}
