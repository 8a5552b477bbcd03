use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    infra::{RateLimiterTrait, config::AppConfig},
    use_cases::{
        admin::AdminUseCases, contact::ContactUseCases, counter::CounterUseCases,
        registration::RegistrationUseCases,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub registration_use_cases: Arc<RegistrationUseCases>,
    pub counter_use_cases: Arc<CounterUseCases>,
    pub admin_use_cases: Arc<AdminUseCases>,
    pub contact_use_cases: Arc<ContactUseCases>,
    pub rate_limiter: Arc<dyn RateLimiterTrait>,
}

impl FromRef<AppState> for Arc<CounterUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.counter_use_cases.clone()
    }
}

impl FromRef<AppState> for Arc<ContactUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.contact_use_cases.clone()
    }
}
