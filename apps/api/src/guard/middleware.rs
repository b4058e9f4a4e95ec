use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// Rejects the request with 429 once the caller exceeds the sliding-window limit.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = client_key(&request);
    if !state.limiter.check(&key) {
        warn!(
            client = %key,
            path = %request.uri().path(),
            "Rate limit exceeded"
        );
        return Err(AppError::RateLimited {
            retry_after_secs: state.limiter.window().as_secs().max(1),
        });
    }
    Ok(next.run(request).await)
}

/// First `X-Forwarded-For` hop, else the peer address, else `"anonymous"`.
fn client_key(request: &Request) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip().to_string())
        })
        .unwrap_or_else(|| "anonymous".to_string())
}
