use crate::{
    adapters::{email::resend::ResendEmailSender, http::app_state::AppState},
    application::ranking::{OsRankSource, RankCalculator},
    infra::{
        InfraError, RateLimiterTrait, config::AppConfig, postgres_persistence,
        rate_limit::RedisRateLimiter,
    },
    use_cases::{
        admin::AdminUseCases,
        contact::ContactUseCases,
        counter::{CounterRepo, CounterUseCases},
        registration::{EmailSender, RegistrationUseCases, WaitlistRepo},
    },
};
use std::fs::File;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env()?;

    let postgres_arc = Arc::new(postgres_persistence(&config.database_url).await?);

    let rate_limiter: Arc<dyn RateLimiterTrait> = Arc::new(
        RedisRateLimiter::new(
            &config.redis_url,
            config.rate_limit_window_secs,
            config.rate_limit_per_ip,
        )
        .await?,
    );

    let email: Arc<dyn EmailSender> = Arc::new(ResendEmailSender::new(
        config.resend_api_key.clone(),
        config.email_from.clone(),
    ));

    let waitlist_repo = postgres_arc.clone() as Arc<dyn WaitlistRepo>;
    let counter_repo = postgres_arc.clone() as Arc<dyn CounterRepo>;

    let ranks = RankCalculator::new(
        config.rank_policy,
        config.rank_min,
        config.rank_max,
        Arc::new(OsRankSource),
    )
    .map_err(InfraError::UseCaseInit)?;

    let counter_use_cases = Arc::new(CounterUseCases::new(
        counter_repo,
        config.counter_base_offset,
    ));

    let registration_use_cases = RegistrationUseCases::new(
        waitlist_repo.clone(),
        email.clone(),
        counter_use_cases.clone(),
        ranks,
        config.product_name.clone(),
        config.site_origin_str(),
    );

    let admin_use_cases = AdminUseCases::new(
        waitlist_repo,
        config.jwt_secret.clone(),
        config.admin_session_ttl,
        &config.admin_password,
        config.admin_api_key.as_ref(),
    )
    .map_err(InfraError::UseCaseInit)?;

    let contact_use_cases = ContactUseCases::new(
        email,
        config.contact_inbox.clone(),
        config.product_name.clone(),
        config.site_origin_str(),
    );

    tracing::info!(
        rank_policy = config.rank_policy.as_str(),
        base_offset = config.counter_base_offset,
        "Application state initialized"
    );

    Ok(AppState {
        config: Arc::new(config),
        registration_use_cases: Arc::new(registration_use_cases),
        counter_use_cases,
        admin_use_cases: Arc::new(admin_use_cases),
        contact_use_cases: Arc::new(contact_use_cases),
        rate_limiter,
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "skillpod_waitlist=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs). Console-only if the file can't be created.
    let json_layer = match File::create("app.log") {
        Ok(file) => Some(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(true)
                .with_span_list(true),
        ),
        Err(e) => {
            eprintln!("cannot create app.log, JSON logging disabled: {e}");
            None
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
