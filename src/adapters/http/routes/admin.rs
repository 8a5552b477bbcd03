use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use waitlist_types::{AdminLoginRequest, AdminWaitlistResponse, WaitlistEntryView};

use crate::{
    adapters::http::app_state::AppState,
    app_error::{AppError, AppResult},
};

pub const ADMIN_SESSION_COOKIE: &str = "admin_session";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/waitlist", get(list_waitlist))
}

fn append_cookie(headers: &mut HeaderMap, cookie: Cookie<'_>) -> AppResult<()> {
    let value = HeaderValue::from_str(&cookie.to_string())
        .map_err(|_| AppError::Internal("Failed to build cookie header".into()))?;
    headers.append(header::SET_COOKIE, value);
    Ok(())
}

fn session_cookie(value: String, secure: bool, max_age: time::Duration) -> Cookie<'static> {
    Cookie::build((ADMIN_SESSION_COOKIE, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(max_age)
        .build()
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// POST /api/admin/login
async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<AdminLoginRequest>,
) -> AppResult<impl IntoResponse> {
    let admin = &app_state.admin_use_cases;
    let token = admin.login(&payload.password).await?;

    let mut headers = HeaderMap::new();
    append_cookie(
        &mut headers,
        session_cookie(
            token,
            app_state.config.secure_cookies(),
            admin.session_ttl(),
        ),
    )?;
    Ok((StatusCode::NO_CONTENT, headers))
}

/// POST /api/admin/logout
async fn logout(State(app_state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut headers = HeaderMap::new();
    append_cookie(
        &mut headers,
        session_cookie(
            String::new(),
            app_state.config.secure_cookies(),
            time::Duration::seconds(0),
        ),
    )?;
    Ok((StatusCode::NO_CONTENT, headers))
}

/// GET /api/admin/waitlist
/// Accepts a bearer token (API key or session JWT) or the session cookie.
async fn list_waitlist(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    cookies: CookieJar,
) -> AppResult<Json<AdminWaitlistResponse>> {
    let admin = &app_state.admin_use_cases;

    let via_bearer = bearer_token(&headers).is_some_and(|t| admin.authorize_bearer(t).is_ok());
    let via_cookie = !via_bearer
        && cookies
            .get(ADMIN_SESSION_COOKIE)
            .is_some_and(|c| admin.authorize_session(c.value()).is_ok());
    if !via_bearer && !via_cookie {
        return Err(AppError::InvalidCredentials);
    }

    let waitlist: Vec<WaitlistEntryView> = admin
        .list_waitlist()
        .await?
        .into_iter()
        .map(WaitlistEntryView::from)
        .collect();
    tracing::debug!(entries = waitlist.len(), "Admin waitlist listed");
    Ok(Json(AdminWaitlistResponse { waitlist }))
}
