//! Job catalog and filter engine with the guard utilities that protect it:
//! input sanitizers, a sliding-window rate limiter, password scoring,
//! the Content-Security-Policy header and password-based encryption.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod errors;
pub mod guard;
pub mod models;
pub mod routes;
pub mod state;
