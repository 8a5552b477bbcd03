use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    app_error::{AppError, AppResult},
    use_cases::registration::EmailSender,
};
use secrecy::ExposeSecret;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Clone)]
pub struct ResendEmailSender {
    client: Client,
    api_key: secrecy::SecretString,
    from: String,
}

impl ResendEmailSender {
    pub fn new(api_key: secrecy::SecretString, from: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            from,
        }
    }
}

#[derive(Serialize)]
struct ResendReq<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

#[derive(Deserialize)]
struct ResendResp {
    id: String,
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<String> {
        let body = ResendReq {
            from: &self.from,
            to: [to],
            subject,
            html,
        };
        let resp = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::EmailDelivery(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::error!(status = %status, detail = %detail, "Resend rejected email");
            return Err(AppError::EmailDelivery(format!("provider returned {status}")));
        }

        let parsed: ResendResp = resp
            .json()
            .await
            .map_err(|e| AppError::EmailDelivery(e.to_string()))?;
        tracing::debug!(email_id = %parsed.id, "Email accepted by Resend");
        Ok(parsed.id)
    }
}
