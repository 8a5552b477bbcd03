//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates an `AppState` backed by in-memory mocks.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use secrecy::SecretString;
use time::Duration;
use url::Url;

use crate::{
    adapters::http::app_state::AppState,
    application::ranking::{RankCalculator, RankPolicy},
    domain::entities::{counter::WaitlistCounter, waitlist_entry::WaitlistEntry},
    infra::{RateLimiterTrait, config::AppConfig},
    test_utils::{
        FixedRankSource, InMemoryCounterRepo, InMemoryEmailSender, InMemoryRateLimiter,
        InMemoryWaitlistRepo,
    },
    use_cases::{
        admin::AdminUseCases, contact::ContactUseCases, counter::CounterUseCases,
        registration::RegistrationUseCases,
    },
};

pub const TEST_JWT_SECRET: &str = "test_jwt_secret";
pub const TEST_ADMIN_PASSWORD: &str = "test-admin-password";
pub const TEST_BASE_OFFSET: u64 = 3119;
/// Rank every registration receives under the default random policy.
pub const TEST_DRAWN_RANK: u32 = 3500;

/// Handles to the mocks behind a built `AppState`, for assertions.
pub struct TestMocks {
    pub waitlist: Arc<InMemoryWaitlistRepo>,
    pub counter: Arc<InMemoryCounterRepo>,
    pub email: Arc<InMemoryEmailSender>,
    pub rate_limiter: Arc<InMemoryRateLimiter>,
}

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let (app_state, mocks) = TestAppStateBuilder::new()
///     .with_entry(create_test_entry(|e| e.waitlist_rank = 3050))
///     .with_admin_api_key("static-key")
///     .build_with_mocks();
/// ```
pub struct TestAppStateBuilder {
    entries: Vec<WaitlistEntry>,
    counter: Option<WaitlistCounter>,
    rank_policy: RankPolicy,
    admin_api_key: Option<String>,
    rate_limit: Option<u64>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self {
            entries: vec![],
            counter: None,
            rank_policy: RankPolicy::Random,
            admin_api_key: None,
            rate_limit: None,
        }
    }

    /// Add a stored entry to the test state.
    pub fn with_entry(mut self, entry: WaitlistEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Start from an existing counter row instead of an unseeded one.
    pub fn with_counter(mut self, counter: WaitlistCounter) -> Self {
        self.counter = Some(counter);
        self
    }

    pub fn with_rank_policy(mut self, policy: RankPolicy) -> Self {
        self.rank_policy = policy;
        self
    }

    /// Limit each client IP to `max_per_ip` requests instead of never blocking.
    pub fn with_rate_limit(mut self, max_per_ip: u64) -> Self {
        self.rate_limit = Some(max_per_ip);
        self
    }

    pub fn with_admin_api_key(mut self, key: &str) -> Self {
        self.admin_api_key = Some(key.to_string());
        self
    }

    /// Build the AppState and return the mocks behind it.
    pub fn build_with_mocks(self) -> (AppState, TestMocks) {
        let waitlist = Arc::new(InMemoryWaitlistRepo::with_entries(self.entries));
        let counter = Arc::new(match self.counter {
            Some(row) => InMemoryCounterRepo::with_counter(row),
            None => InMemoryCounterRepo::new(),
        });
        let email = Arc::new(InMemoryEmailSender::new());

        let config = Arc::new(AppConfig {
            bind_addr: "127.0.0.1:3001".parse::<SocketAddr>().unwrap(),
            database_url: String::new(),
            redis_url: String::new(),
            rate_limit_window_secs: 60,
            rate_limit_per_ip: 30,
            trust_proxy: false,
            cors_origin: HeaderValue::from_static("http://localhost:3000"),
            jwt_secret: SecretString::new(TEST_JWT_SECRET.into()),
            admin_password: SecretString::new(TEST_ADMIN_PASSWORD.into()),
            admin_api_key: self
                .admin_api_key
                .map(|key| SecretString::new(key.into())),
            admin_session_ttl: Duration::hours(24),
            resend_api_key: SecretString::new("test_resend_key".into()),
            email_from: "SkillPod <hello@skillpod.test>".to_string(),
            contact_inbox: "team@skillpod.test".to_string(),
            product_name: "SkillPod".to_string(),
            site_origin: Url::parse("https://skillpod.test").unwrap(),
            counter_base_offset: TEST_BASE_OFFSET,
            rank_policy: self.rank_policy,
            rank_min: 3020,
            rank_max: 4000,
        });

        let ranks = RankCalculator::new(
            config.rank_policy,
            config.rank_min,
            config.rank_max,
            Arc::new(FixedRankSource(TEST_DRAWN_RANK)),
        )
        .unwrap();

        let counter_use_cases = Arc::new(CounterUseCases::new(
            counter.clone(),
            config.counter_base_offset,
        ));

        let registration_use_cases = Arc::new(RegistrationUseCases::new(
            waitlist.clone(),
            email.clone(),
            counter_use_cases.clone(),
            ranks,
            config.product_name.clone(),
            config.site_origin_str(),
        ));

        let admin_use_cases = Arc::new(
            AdminUseCases::new(
                waitlist.clone(),
                config.jwt_secret.clone(),
                config.admin_session_ttl,
                &config.admin_password,
                config.admin_api_key.as_ref(),
            )
            .unwrap(),
        );

        let contact_use_cases = Arc::new(ContactUseCases::new(
            email.clone(),
            config.contact_inbox.clone(),
            config.product_name.clone(),
            config.site_origin_str(),
        ));

        let rate_limiter = Arc::new(match self.rate_limit {
            Some(max_per_ip) => InMemoryRateLimiter::new(max_per_ip),
            None => InMemoryRateLimiter::permissive(),
        });

        let app_state = AppState {
            config,
            registration_use_cases,
            counter_use_cases,
            admin_use_cases,
            contact_use_cases,
            rate_limiter: rate_limiter.clone() as Arc<dyn RateLimiterTrait>,
        };
        (
            app_state,
            TestMocks {
                waitlist,
                counter,
                email,
                rate_limiter,
            },
        )
    }

    /// Build the AppState with all configured mocks.
    pub fn build(self) -> AppState {
        self.build_with_mocks().0
    }
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
