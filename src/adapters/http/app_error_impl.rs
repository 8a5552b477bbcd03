use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use waitlist_types::ApiErrorBody;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        tracing::error!(error = ?self, "Request failed");

        let code = self.code();
        match self {
            AppError::Database(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                code,
                "Database operation failed",
            ),
            AppError::Unavailable => error_resp(
                StatusCode::SERVICE_UNAVAILABLE,
                code,
                "Service temporarily unavailable",
            ),
            AppError::RateLimited => error_resp(
                StatusCode::TOO_MANY_REQUESTS,
                code,
                "Too many requests. Please slow down.",
            ),
            AppError::InvalidCredentials => {
                error_resp(StatusCode::UNAUTHORIZED, code, "Unauthorized")
            }
            AppError::InvalidInput(msg) => error_resp(StatusCode::BAD_REQUEST, code, &msg),
            AppError::NotFound => error_resp(StatusCode::NOT_FOUND, code, "Not found"),
            AppError::EmailDelivery(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                code,
                "Failed to send confirmation email",
            ),
            AppError::Internal(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                code,
                "Internal server error",
            ),
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: &str) -> Response {
    let body = ApiErrorBody {
        code,
        error: message.to_string(),
    };
    (status, Json(body)).into_response()
}
