use axum::{Json, Router, extract::State, routing::post};
use waitlist_types::{RegistrationRequest, RegistrationResponse};

use crate::{
    adapters::http::app_state::AppState,
    app_error::AppResult,
    use_cases::registration::{PARTIAL_SUCCESS_MESSAGE, RegistrationOutcome, SUCCESS_MESSAGE},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/waitlist", post(register))
}

/// POST /api/waitlist
/// Both a full and a partial success answer 200; the body tells them apart.
async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegistrationRequest>,
) -> AppResult<Json<RegistrationResponse>> {
    let outcome = app_state
        .registration_use_cases
        .register(payload)
        .await?;
    Ok(Json(to_response(outcome)))
}

fn to_response(outcome: RegistrationOutcome) -> RegistrationResponse {
    match outcome {
        RegistrationOutcome::Success {
            entry_id,
            email_id,
            rank,
            points,
        } => RegistrationResponse::Success {
            success: true,
            entry_id,
            email_id,
            rank,
            points,
            message: SUCCESS_MESSAGE.to_string(),
        },
        RegistrationOutcome::PartialSuccess {
            email_id,
            rank,
            points,
            error,
        } => RegistrationResponse::Partial {
            partial_success: true,
            email_id,
            rank,
            points,
            message: PARTIAL_SUCCESS_MESSAGE.to_string(),
            error,
        },
    }
}
