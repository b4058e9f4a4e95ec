//! Static job snapshot — the only data source the catalog reads.
//!
//! The snapshot is produced out-of-band by the ingestion process and loaded
//! wholesale once per process start. Accepts either a bare JSON array of
//! jobs or an object of the form `{ "jobs": [...] }`.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::job::Job;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read job snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse job snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate job id in snapshot: {0}")]
    DuplicateId(String),
}

#[derive(Deserialize)]
struct WrappedSnapshot {
    jobs: Vec<Job>,
}

/// Every record in the snapshot, active or not, in file order.
#[derive(Debug, Clone, Default)]
pub struct JobSnapshot {
    jobs: Vec<Job>,
}

impl JobSnapshot {
    pub fn new(jobs: Vec<Job>) -> Result<Self, SnapshotError> {
        let mut seen = HashSet::with_capacity(jobs.len());
        for job in &jobs {
            if !seen.insert(job.id.as_str()) {
                return Err(SnapshotError::DuplicateId(job.id.clone()));
            }
        }

        let inverted: Vec<&str> = jobs
            .iter()
            .filter(|j| j.has_inverted_salary())
            .map(|j| j.id.as_str())
            .collect();
        if !inverted.is_empty() {
            warn!(
                count = inverted.len(),
                ids = ?inverted,
                "Snapshot contains jobs with salary_min > salary_max; keeping them unchanged"
            );
        }

        Ok(Self { jobs })
    }

    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let jobs = if raw.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<Job>>(raw)?
        } else {
            serde_json::from_str::<WrappedSnapshot>(raw)?.jobs
        };
        Self::new(jobs)
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let snapshot = Self::from_json(&raw)?;
        info!(
            "Loaded job snapshot from {} ({} records)",
            path.display(),
            snapshot.len()
        );
        Ok(snapshot)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }
}

/// Returns every active job from the snapshot, in snapshot order.
pub fn load_active_jobs(snapshot: &JobSnapshot) -> Vec<Job> {
    snapshot
        .jobs
        .iter()
        .filter(|job| job.is_active)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"[
        {"id": "a", "title": "Rust Engineer", "company": "Paystack", "location": "Lagos, Lagos, Nigeria",
         "job_type": "full-time", "experience_level": "senior", "is_active": true},
        {"id": "b", "title": "Data Analyst", "company": "Takealot", "location": "Cape Town, Western Cape, South Africa",
         "job_type": "contract", "experience_level": "mid", "is_active": false},
        {"id": "c", "title": "Designer", "company": "Remote Co", "location": "Anywhere",
         "job_type": "freelance", "experience_level": "junior", "is_active": true},
        {"id": "d", "title": "Intern", "company": "Paystack", "location": "Lagos, Lagos, Nigeria",
         "job_type": "internship", "experience_level": "entry"}
    ]"#;

    #[test]
    fn test_load_active_jobs_excludes_inactive() {
        let snapshot = JobSnapshot::from_json(SNAPSHOT).unwrap();
        let active = load_active_jobs(&snapshot);
        assert!(active.iter().all(|j| j.is_active));
        assert!(!active.iter().any(|j| j.id == "b" || j.id == "d"));
    }

    #[test]
    fn test_load_active_jobs_preserves_snapshot_order() {
        let snapshot = JobSnapshot::from_json(SNAPSHOT).unwrap();
        let ids: Vec<_> = load_active_jobs(&snapshot)
            .into_iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_load_active_jobs_is_idempotent() {
        let snapshot = JobSnapshot::from_json(SNAPSHOT).unwrap();
        assert_eq!(load_active_jobs(&snapshot), load_active_jobs(&snapshot));
    }

    #[test]
    fn test_wrapped_snapshot_is_accepted() {
        let wrapped = format!(r#"{{"jobs": {SNAPSHOT}}}"#);
        let snapshot = JobSnapshot::from_json(&wrapped).unwrap();
        assert_eq!(snapshot.len(), 4);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let raw = r#"[
            {"id": "x", "title": "t", "company": "c", "location": "l", "job_type": "contract", "experience_level": "mid"},
            {"id": "x", "title": "t2", "company": "c", "location": "l", "job_type": "contract", "experience_level": "mid"}
        ]"#;
        let err = JobSnapshot::from_json(raw).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateId(id) if id == "x"));
    }

    #[test]
    fn test_unknown_job_type_fails_at_load() {
        let raw = r#"[{"id": "x", "title": "t", "company": "c", "location": "l",
                       "job_type": "gig", "experience_level": "mid"}]"#;
        assert!(matches!(
            JobSnapshot::from_json(raw),
            Err(SnapshotError::Parse(_))
        ));
    }

    // Known relaxation: inverted salary ranges are reported, not rejected.
    #[test]
    fn test_inverted_salary_range_is_kept() {
        let raw = r#"[{"id": "x", "title": "t", "company": "c", "location": "l",
                       "job_type": "contract", "experience_level": "mid", "is_active": true,
                       "salary_min": 5000, "salary_max": 100}]"#;
        let snapshot = JobSnapshot::from_json(raw).unwrap();
        let active = load_active_jobs(&snapshot);
        assert_eq!(active.len(), 1);
        assert!(active[0].has_inverted_salary());
    }

    #[test]
    fn test_bundled_snapshot_loads() {
        let snapshot = JobSnapshot::from_json(include_str!("../../data/jobs.json")).unwrap();
        let active = load_active_jobs(&snapshot);
        assert_eq!(snapshot.len(), 8);
        assert_eq!(active.len(), 7);
        assert!(active.iter().all(|j| !j.has_inverted_salary()));
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let snapshot = JobSnapshot::from_path(file.path()).await.unwrap();
        assert_eq!(snapshot.len(), 4);
    }

    #[tokio::test]
    async fn test_from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = JobSnapshot::from_path(dir.path().join("missing.json")).await;
        assert!(matches!(result, Err(SnapshotError::Io(_))));
    }
}
