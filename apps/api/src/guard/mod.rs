//! Best-effort input hardening: sanitizers, request limiting, password
//! scoring, the CSP policy, and password-based encryption helpers.

pub mod crypto;
pub mod csp;
pub mod handlers;
pub mod middleware;
pub mod password;
pub mod rate_limit;
pub mod sanitize;
