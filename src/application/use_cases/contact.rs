use std::sync::Arc;

use tracing::instrument;
use waitlist_types::ContactRequest;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        email_templates::contact_request_email, use_cases::registration::EmailSender,
        validators::is_valid_email,
    },
};

/// Relays collaborator requests from the public site to the team inbox.
#[derive(Clone)]
pub struct ContactUseCases {
    email: Arc<dyn EmailSender>,
    inbox: String,
    product_name: String,
    site_origin: String,
}

impl ContactUseCases {
    pub fn new(
        email: Arc<dyn EmailSender>,
        inbox: String,
        product_name: String,
        site_origin: String,
    ) -> Self {
        Self {
            email,
            inbox,
            product_name,
            site_origin,
        }
    }

    /// Returns the provider message id of the relayed email.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn submit(&self, req: ContactRequest) -> AppResult<String> {
        let name = req.name.trim();
        let email = req.email.trim();
        let message = req.message.trim();
        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(AppError::InvalidInput(
                "Name, email and message are required".into(),
            ));
        }
        if !is_valid_email(email) {
            return Err(AppError::InvalidInput("Invalid email format".into()));
        }

        let (subject, html) = contact_request_email(
            &self.product_name,
            &self.site_origin,
            name,
            email,
            message,
            req.skills.as_deref(),
        );

        let message_id = self
            .email
            .send(&self.inbox, &subject, &html)
            .await
            .map_err(|e| match e {
                AppError::EmailDelivery(_) => e,
                other => AppError::EmailDelivery(other.to_string()),
            })?;
        tracing::info!(message_id = %message_id, "Contact request relayed");
        Ok(message_id)
    }
}
