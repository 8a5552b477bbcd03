use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::{adapters::http::app_state::AppState, app_error::AppError};

pub async fn rate_limit_middleware(
    State(app_state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Only trust forwarded headers if explicitly configured (when behind a reverse proxy)
    let ip = if app_state.config.trust_proxy {
        forwarded_ip(request.headers()).unwrap_or_else(|| addr.ip().to_string())
    } else {
        addr.ip().to_string()
    };

    tracing::debug!(
        trust_proxy = app_state.config.trust_proxy,
        connect_ip = %addr.ip(),
        using_ip = %ip,
        "Rate limiting request"
    );

    match app_state.rate_limiter.check(&ip).await {
        Err(AppError::RateLimited) => return Err(AppError::RateLimited),
        // Limiter outage must not take the public routes down with it.
        Err(e) => {
            tracing::warn!(error = %e, ip = %ip, "Rate limiter unavailable, allowing request")
        }
        Ok(()) => {}
    }

    Ok(next.run(request).await)
}

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    // Extract IP from X-Forwarded-For or X-Real-IP headers
    if let Some(forwarded) = headers.get("x-forwarded-for")
        && let Ok(val) = forwarded.to_str()
        && let Some(first) = val.split(',').next()
    {
        let trimmed = first.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    if let Some(real) = headers.get("x-real-ip")
        && let Ok(val) = real.to_str()
        && !val.trim().is_empty()
    {
        return Some(val.trim().to_string());
    }
    None
}
