//! Filter engine — a pure projection from (jobs, criteria) to the jobs a user sees.
//!
//! Fields combine with AND. Within `skills` the policy is match-ANY.
//! `search`, `location` and `skills` compare case-insensitively while
//! `job_type` and `experience_level` are exact, case-sensitive matches
//! against the snapshot spelling.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::job::Job;

/// Filter criteria for a single query. Every field is optional; `None`, an
/// empty string, `false`, or an empty skill list adds no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    #[serde(default)]
    pub remote_only: bool,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        present(&self.search).is_none()
            && present(&self.location).is_none()
            && present(&self.job_type).is_none()
            && present(&self.experience_level).is_none()
            && !self.remote_only
            && self.skills.is_empty()
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Applies `criteria` to `jobs`, keeping input order among survivors.
pub fn filter_jobs<'a>(jobs: &'a [Job], criteria: &FilterCriteria) -> Vec<&'a Job> {
    let search = present(&criteria.search).map(str::to_lowercase);
    let location = present(&criteria.location).map(str::to_lowercase);
    let job_type = present(&criteria.job_type);
    let experience_level = present(&criteria.experience_level);
    let skills: Vec<String> = criteria.skills.iter().map(|s| s.to_lowercase()).collect();

    jobs.iter()
        .filter(|job| match &search {
            Some(q) => {
                contains_ci(&job.title, q)
                    || contains_ci(&job.company, q)
                    || contains_ci(&job.description, q)
            }
            None => true,
        })
        .filter(|job| match &location {
            Some(loc) => contains_ci(&job.location, loc),
            None => true,
        })
        .filter(|job| job_type.map_or(true, |t| job.job_type.as_str() == t))
        .filter(|job| experience_level.map_or(true, |l| job.experience_level.as_str() == l))
        .filter(|job| !criteria.remote_only || job.remote_allowed)
        .filter(|job| {
            skills.is_empty()
                || job
                    .skills_required
                    .iter()
                    .any(|have| skills.contains(&have.to_lowercase()))
        })
        .collect()
}

/// Distinct skills across `jobs`, sorted ascending (case-sensitive).
pub fn get_all_skills<'a, I>(jobs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Job>,
{
    jobs.into_iter()
        .flat_map(|job| job.skills_required.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct locations across `jobs`, sorted ascending (case-sensitive).
pub fn get_all_locations<'a, I>(jobs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Job>,
{
    jobs.into_iter()
        .map(|job| job.location.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Returns the 1-indexed page `[(page-1)*per_page, page*per_page)` of `items`.
/// Page 0, `per_page` 0 and pages past the end all yield an empty slice.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = match (page - 1).checked_mul(per_page) {
        Some(start) if start < items.len() => start,
        _ => return &[],
    };
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}
