use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub jobs_snapshot_path: PathBuf,
    /// `APP_ENV=development` relaxes the Content-Security-Policy for local dev servers.
    pub development: bool,
    pub rate_limit_max_requests: usize,
    pub rate_limit_window: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "production".to_string());

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            jobs_snapshot_path: std::env::var("JOBS_SNAPSHOT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/jobs.json")),
            development: app_env.eq_ignore_ascii_case("development"),
            rate_limit_max_requests: parse_env("RATE_LIMIT_MAX_REQUESTS", 60)?,
            rate_limit_window: rate_limit_window(parse_env("RATE_LIMIT_WINDOW_MS", 60_000)?)?,
        })
    }
}

/// The limiter window doubles as the sweep period, so it must be non-zero.
fn rate_limit_window(millis: u64) -> Result<Duration> {
    if millis == 0 {
        anyhow::bail!("RATE_LIMIT_WINDOW_MS must be greater than 0");
    }
    Ok(Duration::from_millis(millis))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
