//! HTTP client for the waitlist API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use waitlist_types::{
    AdminWaitlistResponse, ApiErrorBody, ContactRequest, ContactResponse, CountResponse,
    IncrementResponse, RegistrationRequest, RegistrationResponse, WaitlistEntryView,
};

use crate::error::WaitlistSdkError;
use crate::sync::CountSource;

/// Configuration for the waitlist client.
#[derive(Debug, Clone)]
pub struct WaitlistConfig {
    /// Site origin serving the API (e.g., "https://skillpod.app")
    pub base_url: String,

    /// Per-request timeout (default: 10 seconds)
    pub timeout: Option<Duration>,
}

pub struct WaitlistClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl WaitlistClient {
    pub fn new(config: WaitlistConfig) -> Result<Self, WaitlistSdkError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(WaitlistSdkError::Config("base_url is required".into()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(WaitlistSdkError::Config(
                "base_url must start with http:// or https://".into(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout.unwrap_or(Duration::from_secs(10)))
            .build()?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Submits a signup.
    ///
    /// A partial success (email sent, entry not stored) is returned as
    /// `Ok(RegistrationResponse::Partial { .. })`, not as an error.
    pub async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResponse, WaitlistSdkError> {
        let response = self
            .http_client
            .post(self.url("/api/waitlist"))
            .json(request)
            .send()
            .await?;
        parse(response).await
    }

    pub async fn count(&self) -> Result<CountResponse, WaitlistSdkError> {
        let response = self
            .http_client
            .get(self.url("/api/waitlist/count"))
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        parse(response).await
    }

    pub async fn increment(&self) -> Result<IncrementResponse, WaitlistSdkError> {
        let response = self
            .http_client
            .post(self.url("/api/waitlist/count"))
            .send()
            .await?;
        parse(response).await
    }

    /// Lists entries using an admin session token or admin API key.
    pub async fn admin_waitlist(
        &self,
        bearer: &str,
    ) -> Result<Vec<WaitlistEntryView>, WaitlistSdkError> {
        let response = self
            .http_client
            .get(self.url("/api/admin/waitlist"))
            .bearer_auth(bearer)
            .send()
            .await?;
        let body: AdminWaitlistResponse = parse(response).await?;
        Ok(body.waitlist)
    }

    pub async fn contact(
        &self,
        request: &ContactRequest,
    ) -> Result<ContactResponse, WaitlistSdkError> {
        let response = self
            .http_client
            .post(self.url("/api/contact"))
            .json(request)
            .send()
            .await?;
        parse(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl CountSource for WaitlistClient {
    async fn fetch_count(&self) -> Result<u64, WaitlistSdkError> {
        Ok(self.count().await?.count)
    }

    async fn increment_count(&self) -> Result<u64, WaitlistSdkError> {
        Ok(self.increment().await?.count)
    }
}

async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, WaitlistSdkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let raw = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ApiErrorBody>(&raw) {
        Ok(body) => (Some(body.code), body.error),
        Err(_) => (None, status.canonical_reason().unwrap_or("request failed").to_string()),
    };

    Err(WaitlistSdkError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}
