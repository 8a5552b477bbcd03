use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use waitlist_types::{CountResponse, IncrementResponse};

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
    use_cases::counter::CounterUseCases,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/waitlist/count", get(get_count).post(increment_count))
}

/// GET /api/waitlist/count
/// Never fails outright: a store error still reports the floor so the page has a number.
async fn get_count(State(counter): State<Arc<CounterUseCases>>) -> impl IntoResponse {
    let (status, body) = match counter.current().await {
        Ok(row) => (
            StatusCode::OK,
            CountResponse {
                count: row.displayed(),
                last_updated: row.last_updated,
                error: None,
            },
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read waitlist count");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                CountResponse {
                    count: counter.floor(),
                    last_updated: None,
                    error: Some("Failed to fetch waitlist count".to_string()),
                },
            )
        }
    };
    (status, [(header::CACHE_CONTROL, "no-store")], Json(body))
}

/// POST /api/waitlist/count
/// Any store failure is a 500, including an unreachable store.
async fn increment_count(
    State(counter): State<Arc<CounterUseCases>>,
) -> AppResult<Json<IncrementResponse>> {
    let row = counter.increment().await.map_err(|e| match e {
        AppError::Unavailable => AppError::Database(e.to_string()),
        other => other,
    })?;
    Ok(Json(IncrementResponse {
        count: row.displayed(),
        success: true,
    }))
}
