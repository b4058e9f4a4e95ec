pub mod health;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::catalog::handlers;
use crate::guard::csp::csp_header;
use crate::guard::handlers::handle_password_strength;
use crate::guard::middleware::rate_limit;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Result<Router> {
    let csp = HeaderValue::from_str(&csp_header(state.config.development))
        .context("CSP policy is not a valid header value")?;

    let api = Router::new()
        .route("/api/v1/jobs", get(handlers::handle_list_jobs))
        .route("/api/v1/jobs/facets", get(handlers::handle_facets))
        .route("/api/v1/jobs/:id", get(handlers::handle_get_job))
        .route("/api/v1/companies", get(handlers::handle_list_companies))
        .route(
            "/api/v1/guard/password-strength",
            post(handle_password_strength),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Ok(Router::new()
        .route("/health", get(health::health_handler))
        .merge(api)
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp,
        ))
        .with_state(state))
}
