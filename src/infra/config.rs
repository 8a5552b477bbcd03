use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::get_env_default;
use secrecy::SecretString;
use time::Duration;
use url::Url;

use super::InfraError;
use crate::application::ranking::RankPolicy;

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub redis_url: String,
    pub rate_limit_window_secs: u64,
    pub rate_limit_per_ip: u64,
    /// Whether to trust X-Forwarded-For headers. Only enable behind a reverse proxy.
    pub trust_proxy: bool,
    pub cors_origin: HeaderValue,
    pub jwt_secret: SecretString,
    pub admin_password: SecretString,
    /// Static bearer key for scripted access to the admin listing.
    pub admin_api_key: Option<SecretString>,
    pub admin_session_ttl: Duration,
    pub resend_api_key: SecretString,
    pub email_from: String,
    pub contact_inbox: String,
    pub product_name: String,
    pub site_origin: Url,
    /// Public counter value before any signups were recorded.
    pub counter_base_offset: u64,
    pub rank_policy: RankPolicy,
    pub rank_min: u32,
    pub rank_max: u32,
}

fn required(var: &'static str) -> Result<String, InfraError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(InfraError::ConfigMissing { var }),
    }
}

fn required_secret(var: &'static str) -> Result<SecretString, InfraError> {
    required(var).map(|value| SecretString::new(value.into()))
}

fn invalid(var: &'static str, reason: impl ToString) -> InfraError {
    InfraError::ConfigInvalid {
        var,
        reason: reason.to_string(),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, InfraError> {
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let database_url = required("DATABASE_URL")?;
        let redis_url: String = get_env_default("REDIS_URL", "redis://127.0.0.1:6379".to_string());
        let rate_limit_window_secs: u64 = get_env_default("RATE_LIMIT_WINDOW_SECS", 60);
        let rate_limit_per_ip: u64 = get_env_default("RATE_LIMIT_PER_IP", 30);
        // Default to false, must be enabled explicitly behind a trusted proxy.
        let trust_proxy: bool = get_env_default("TRUST_PROXY", false);
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .map_err(|e| invalid("CORS_ORIGIN", e))?;

        let jwt_secret = required_secret("JWT_SECRET")?;
        let admin_password = required_secret("ADMIN_PASSWORD")?;
        let admin_api_key = std::env::var("ADMIN_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(|key| SecretString::new(key.into()));
        let admin_session_ttl_hours: i64 = get_env_default("ADMIN_SESSION_TTL_HOURS", 24);

        let resend_api_key = required_secret("RESEND_API_KEY")?;
        let email_from = required("EMAIL_FROM")?;
        let contact_inbox = required("CONTACT_INBOX")?;
        let product_name: String = get_env_default("PRODUCT_NAME", "SkillPod".to_string());
        let site_origin = Url::parse(&required("SITE_ORIGIN")?)
            .map_err(|e| invalid("SITE_ORIGIN", e))?;

        let counter_base_offset: u64 = get_env_default("COUNTER_BASE_OFFSET", 3119);
        let rank_policy: RankPolicy = get_env_default("RANK_POLICY", "random".to_string())
            .parse()
            .map_err(|e| invalid("RANK_POLICY", e))?;
        let rank_min: u32 = get_env_default("RANK_MIN", 3020);
        let rank_max: u32 = get_env_default("RANK_MAX", 4000);

        Ok(Self {
            bind_addr,
            database_url,
            redis_url,
            rate_limit_window_secs,
            rate_limit_per_ip,
            trust_proxy,
            cors_origin,
            jwt_secret,
            admin_password,
            admin_api_key,
            admin_session_ttl: Duration::hours(admin_session_ttl_hours),
            resend_api_key,
            email_from,
            contact_inbox,
            product_name,
            site_origin,
            counter_base_offset,
            rank_policy,
            rank_min,
            rank_max,
        })
    }

    /// Session cookies carry `Secure` whenever the site is served over https.
    pub fn secure_cookies(&self) -> bool {
        self.site_origin.scheme() == "https"
    }

    /// Site origin without the trailing slash `Url` adds.
    pub fn site_origin_str(&self) -> String {
        self.site_origin.as_str().trim_end_matches('/').to_string()
    }
}
