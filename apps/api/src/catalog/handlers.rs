use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::filter::{filter_jobs, get_all_locations, get_all_skills, paginate, FilterCriteria};
use crate::errors::AppError;
use crate::guard::sanitize::sanitize_search_query;
use crate::models::company::Company;
use crate::models::job::Job;
use crate::state::AppState;

const DEFAULT_PER_PAGE: usize = 20;
const MAX_PER_PAGE: usize = 100;

/// Query string for `GET /api/v1/jobs`. `skills` is comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct JobsQuery {
    pub search: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub experience_level: Option<String>,
    #[serde(default)]
    pub remote_only: bool,
    pub skills: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl JobsQuery {
    /// Free text passes through the search sanitizer before it reaches the engine.
    /// `job_type` and `experience_level` are exact-match enum values and are
    /// forwarded verbatim, so anything but a wire string matches nothing.
    fn criteria(&self) -> FilterCriteria {
        let clean = |field: &Option<String>| field.as_deref().map(sanitize_search_query);
        FilterCriteria {
            search: clean(&self.search),
            location: clean(&self.location),
            job_type: self.job_type.clone(),
            experience_level: self.experience_level.clone(),
            remote_only: self.remote_only,
            skills: self
                .skills
                .as_deref()
                .map(|raw| {
                    raw.split(',')
                        .map(sanitize_search_query)
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JobListResponse {
    pub jobs: Vec<Job>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FacetsResponse {
    pub skills: Vec<String>,
    pub locations: Vec<String>,
}

fn validate_pagination(page: usize, per_page: usize) -> Result<(), AppError> {
    if page == 0 {
        return Err(AppError::Validation("page must be 1 or greater".to_string()));
    }
    if !(1..=MAX_PER_PAGE).contains(&per_page) {
        return Err(AppError::Validation(format!(
            "per_page must be between 1 and {MAX_PER_PAGE}"
        )));
    }
    Ok(())
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> Result<Json<JobListResponse>, AppError> {
    let page = query.page.unwrap_or(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE);
    validate_pagination(page, per_page)?;

    let criteria = query.criteria();
    let matched = filter_jobs(state.catalog.jobs(), &criteria);
    let total = matched.len();
    debug!(?criteria, total, page, per_page, "Filtered job catalog");

    let jobs = paginate(&matched, page, per_page)
        .iter()
        .map(|job| (*job).clone())
        .collect();

    Ok(Json(JobListResponse {
        jobs,
        total,
        page,
        per_page,
        total_pages: total.div_ceil(per_page),
    }))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Job>, AppError> {
    state
        .catalog
        .find(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
}

/// GET /api/v1/jobs/facets
pub async fn handle_facets(State(state): State<AppState>) -> Json<FacetsResponse> {
    let jobs = state.catalog.jobs();
    Json(FacetsResponse {
        skills: get_all_skills(jobs),
        locations: get_all_locations(jobs),
    })
}

/// GET /api/v1/companies
pub async fn handle_list_companies(State(state): State<AppState>) -> Json<Vec<Company>> {
    Json(state.catalog.companies().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_criteria_sanitizes_text_and_splits_skills() {
        let query = JobsQuery {
            search: Some("  <b>rust</b>   engineer ".into()),
            skills: Some("React, ,<i>Node</i>,".into()),
            job_type: Some("contract".into()),
            ..Default::default()
        };
        let criteria = query.criteria();
        assert_eq!(criteria.search.as_deref(), Some("rust engineer"));
        assert_eq!(criteria.skills, vec!["React".to_string(), "Node".to_string()]);
        assert_eq!(criteria.job_type.as_deref(), Some("contract"));
        assert!(criteria.location.is_none());
    }

    #[test]
    fn test_query_criteria_keeps_enum_values_verbatim() {
        let query = JobsQuery {
            job_type: Some("contract ".into()),
            experience_level: Some(" Senior".into()),
            ..Default::default()
        };
        let criteria = query.criteria();
        assert_eq!(criteria.job_type.as_deref(), Some("contract "));
        assert_eq!(criteria.experience_level.as_deref(), Some(" Senior"));
    }

    #[test]
    fn test_empty_query_yields_empty_criteria() {
        assert!(JobsQuery::default().criteria().is_empty());
    }

    #[test]
    fn test_validate_pagination_bounds() {
        assert!(validate_pagination(1, 20).is_ok());
        assert!(validate_pagination(0, 20).is_err());
        assert!(validate_pagination(1, 0).is_err());
        assert!(validate_pagination(1, MAX_PER_PAGE + 1).is_err());
        // Far pages are valid requests; they just come back empty.
        assert!(validate_pagination(10_000, 10).is_ok());
    }
}
