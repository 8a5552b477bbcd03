use std::sync::Arc;

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use time::Duration;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        jwt::{self, ADMIN_SUBJECT},
        use_cases::registration::WaitlistRepo,
    },
    domain::entities::waitlist_entry::{WaitlistEntry, sort_by_rank},
};

type HmacSha256 = Hmac<Sha256>;

fn new_mac(key: &SecretString) -> AppResult<HmacSha256> {
    HmacSha256::new_from_slice(key.expose_secret().as_bytes())
        .map_err(|e| AppError::Internal(e.to_string()))
}

fn tag(key: &SecretString, value: &str) -> AppResult<Vec<u8>> {
    let mut mac = new_mac(key)?;
    mac.update(value.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Constant-time check of `candidate` against a precomputed tag.
fn matches_tag(key: &SecretString, candidate: &str, expected: &[u8]) -> AppResult<bool> {
    let mut mac = new_mac(key)?;
    mac.update(candidate.as_bytes());
    Ok(mac.verify_slice(expected).is_ok())
}

#[derive(Clone)]
pub struct AdminUseCases {
    repo: Arc<dyn WaitlistRepo>,
    jwt_secret: SecretString,
    session_ttl: Duration,
    password_tag: Vec<u8>,
    api_key_tag: Option<Vec<u8>>,
}

impl AdminUseCases {
    pub fn new(
        repo: Arc<dyn WaitlistRepo>,
        jwt_secret: SecretString,
        session_ttl: Duration,
        admin_password: &SecretString,
        admin_api_key: Option<&SecretString>,
    ) -> AppResult<Self> {
        let password_tag = tag(&jwt_secret, admin_password.expose_secret())?;
        let api_key_tag = admin_api_key
            .map(|key| tag(&jwt_secret, key.expose_secret()))
            .transpose()?;
        Ok(Self {
            repo,
            jwt_secret,
            session_ttl,
            password_tag,
            api_key_tag,
        })
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Checks the password and returns a signed session token.
    #[instrument(skip_all)]
    pub async fn login(&self, password: &str) -> AppResult<String> {
        if !matches_tag(&self.jwt_secret, password, &self.password_tag)? {
            tracing::warn!("Admin login rejected");
            return Err(AppError::InvalidCredentials);
        }
        let token = jwt::issue(ADMIN_SUBJECT, &self.jwt_secret, self.session_ttl)?;
        tracing::info!("Admin session issued");
        Ok(token)
    }

    /// Accepts a session token from the cookie.
    pub fn authorize_session(&self, token: &str) -> AppResult<()> {
        let claims = jwt::verify(token, &self.jwt_secret)?;
        if claims.sub != ADMIN_SUBJECT {
            return Err(AppError::InvalidCredentials);
        }
        Ok(())
    }

    /// Accepts either the static API key or a session token.
    pub fn authorize_bearer(&self, token: &str) -> AppResult<()> {
        if let Some(expected) = &self.api_key_tag
            && matches_tag(&self.jwt_secret, token, expected)?
        {
            return Ok(());
        }
        self.authorize_session(token)
    }

    /// All entries, best rank first; equal ranks keep signup order.
    #[instrument(skip(self))]
    pub async fn list_waitlist(&self) -> AppResult<Vec<WaitlistEntry>> {
        let mut entries = self.repo.list_all().await?;
        sort_by_rank(&mut entries);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{InMemoryWaitlistRepo, create_test_entry};
    use chrono::{Duration as ChronoDuration, Utc};

    fn secret(value: &str) -> SecretString {
        SecretString::from(value.to_string())
    }

    fn admin(repo: Arc<InMemoryWaitlistRepo>, api_key: Option<&str>) -> AdminUseCases {
        let api_key = api_key.map(secret);
        AdminUseCases::new(
            repo,
            secret("jwt-test-secret"),
            Duration::hours(24),
            &secret("hunter2"),
            api_key.as_ref(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_login_with_correct_password() {
        let admin = admin(Arc::new(InMemoryWaitlistRepo::new()), None);
        let token = admin.login("hunter2").await.unwrap();
        admin.authorize_session(&token).unwrap();
        admin.authorize_bearer(&token).unwrap();
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let admin = admin(Arc::new(InMemoryWaitlistRepo::new()), None);
        assert!(matches!(
            admin.login("hunter3").await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(admin.login("").await.is_err());
    }

    #[test]
    fn test_api_key_accepted_only_when_configured() {
        let with_key = admin(Arc::new(InMemoryWaitlistRepo::new()), Some("static-key"));
        with_key.authorize_bearer("static-key").unwrap();
        assert!(with_key.authorize_bearer("other-key").is_err());
        // The API key is not a session token.
        assert!(with_key.authorize_session("static-key").is_err());

        let without_key = admin(Arc::new(InMemoryWaitlistRepo::new()), None);
        assert!(without_key.authorize_bearer("static-key").is_err());
    }

    #[test]
    fn test_token_with_other_subject_rejected() {
        let admin = admin(Arc::new(InMemoryWaitlistRepo::new()), None);
        let token = jwt::issue("someone", &secret("jwt-test-secret"), Duration::hours(1)).unwrap();
        assert!(matches!(
            admin.authorize_session(&token),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_list_sorted_by_rank_then_created_at() {
        let now = Utc::now();
        let a = create_test_entry(|e| {
            e.name = "late-tie".into();
            e.waitlist_rank = 3100;
            e.created_at = now;
        });
        let b = create_test_entry(|e| {
            e.name = "early-tie".into();
            e.waitlist_rank = 3100;
            e.created_at = now - ChronoDuration::minutes(5);
        });
        let c = create_test_entry(|e| {
            e.name = "best".into();
            e.waitlist_rank = 3050;
        });
        let repo = Arc::new(InMemoryWaitlistRepo::with_entries(vec![a, b, c]));
        let admin = admin(repo, None);

        let names: Vec<String> = admin
            .list_waitlist()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["best", "early-tie", "late-tie"]);
    }

    #[tokio::test]
    async fn test_list_when_store_unavailable() {
        let repo = Arc::new(InMemoryWaitlistRepo::new());
        repo.set_failing(true);
        let admin = admin(repo, None);
        assert!(matches!(
            admin.list_waitlist().await,
            Err(AppError::Unavailable)
        ));
    }
}
