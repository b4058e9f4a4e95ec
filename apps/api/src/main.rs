use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobhub::catalog::snapshot::JobSnapshot;
use jobhub::catalog::JobCatalog;
use jobhub::cli::{self, Cli, Command};
use jobhub::config::Config;
use jobhub::guard::rate_limit::SlidingWindowLimiter;
use jobhub::routes::build_router;
use jobhub::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr so `derive-companies` can stream JSON on stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::DeriveCompanies { snapshot, output } => {
            let snapshot = snapshot.unwrap_or_else(|| config.jobs_snapshot_path.clone());
            cli::handle_derive_companies(&snapshot, output.as_deref()).await
        }
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting JobHub API v{}", env!("CARGO_PKG_VERSION"));

    let snapshot = JobSnapshot::from_path(&config.jobs_snapshot_path)
        .await
        .with_context(|| {
            format!(
                "Failed to load job snapshot {}",
                config.jobs_snapshot_path.display()
            )
        })?;
    let catalog = Arc::new(JobCatalog::from_snapshot(&snapshot));

    let limiter = Arc::new(SlidingWindowLimiter::new(
        config.rate_limit_max_requests,
        config.rate_limit_window,
    ));
    Arc::clone(&limiter).spawn_sweeper(config.rate_limit_window);
    info!(
        "Rate limiter: {} requests per {:?} per client",
        config.rate_limit_max_requests, config.rate_limit_window
    );

    if config.development {
        info!("Development mode: relaxed Content-Security-Policy");
    }

    let state = AppState {
        catalog,
        limiter,
        config: config.clone(),
    };

    let app = build_router(state)?
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
