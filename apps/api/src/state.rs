use std::sync::Arc;

use crate::catalog::JobCatalog;
use crate::config::Config;
use crate::guard::rate_limit::SlidingWindowLimiter;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; tests build their own isolated instances.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<JobCatalog>,
    pub limiter: Arc<SlidingWindowLimiter>,
    pub config: Config,
}
