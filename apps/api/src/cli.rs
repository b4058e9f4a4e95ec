use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::catalog::companies::derive_companies;
use crate::catalog::snapshot::{load_active_jobs, JobSnapshot};

#[derive(Parser)]
#[command(name = "jobhub")]
#[command(about = "Job catalog and request-guard API", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Derive the company list from the active jobs of a snapshot
    DeriveCompanies {
        /// Snapshot to read; defaults to JOBS_SNAPSHOT_PATH
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Write JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Renders the derived companies as pretty JSON with a trailing newline.
pub async fn render_companies(snapshot_path: &Path) -> Result<String> {
    let snapshot = JobSnapshot::from_path(snapshot_path)
        .await
        .with_context(|| format!("Failed to load snapshot {}", snapshot_path.display()))?;
    let jobs = load_active_jobs(&snapshot);
    let companies = derive_companies(&jobs);
    info!("Derived {} companies from {} active jobs", companies.len(), jobs.len());

    let mut json = serde_json::to_string_pretty(&companies)?;
    json.push('\n');
    Ok(json)
}

pub async fn handle_derive_companies(snapshot_path: &Path, output: Option<&Path>) -> Result<()> {
    let json = render_companies(snapshot_path).await?;
    match output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote companies to {}", path.display());
        }
        None => print!("{json}"),
    }
    Ok(())
}
