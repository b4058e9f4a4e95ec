pub mod companies;
pub mod filter;
pub mod handlers;
pub mod snapshot;

use tracing::info;

use crate::catalog::companies::derive_companies;
use crate::catalog::snapshot::{load_active_jobs, JobSnapshot};
use crate::models::company::Company;
use crate::models::job::Job;

/// The active jobs and derived companies, built once at startup and shared
/// read-only through `AppState`.
#[derive(Debug, Clone, Default)]
pub struct JobCatalog {
    jobs: Vec<Job>,
    companies: Vec<Company>,
}

impl JobCatalog {
    pub fn from_snapshot(snapshot: &JobSnapshot) -> Self {
        let jobs = load_active_jobs(snapshot);
        let companies = derive_companies(&jobs);
        info!(
            "Job catalog ready: {} active of {} records, {} companies",
            jobs.len(),
            snapshot.len(),
            companies.len()
        );
        Self { jobs, companies }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn find(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }
}
