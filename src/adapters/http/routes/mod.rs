pub mod admin;
pub mod contact;
pub mod count;
pub mod health;
pub mod waitlist;

use axum::Router;

use crate::adapters::http::app_state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/admin", admin::router())
        .merge(waitlist::router())
        .merge(count::router())
        .merge(contact::router())
        .merge(health::router())
}
