//! Company derivation from the distinct `company` values of a job snapshot.
//!
//! Output is sorted by name and fully determined by the input jobs, so
//! re-running against the same snapshot yields byte-identical JSON.

use std::collections::{BTreeMap, HashSet};

use crate::models::company::Company;
use crate::models::job::Job;

/// Lowercases, collapses every non-alphanumeric run to one hyphen, and
/// strips leading/trailing hyphens.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Country bucket inferred from a free-text "City, Region, Country" location.
pub fn infer_country(location: &str) -> &'static str {
    if location.contains("Nigeria") {
        "Nigeria"
    } else if location.contains("South Africa") {
        "South Africa"
    } else {
        "Global"
    }
}

/// Builds the company list. The location is inferred from the first job
/// seen for each company; `job_count` counts every job with that name.
pub fn derive_companies<'a, I>(jobs: I) -> Vec<Company>
where
    I: IntoIterator<Item = &'a Job>,
{
    let mut by_name: BTreeMap<&str, (&'static str, usize)> = BTreeMap::new();
    for job in jobs {
        let name = job.company.trim();
        if name.is_empty() {
            continue;
        }
        by_name
            .entry(name)
            .or_insert((infer_country(&job.location), 0))
            .1 += 1;
    }

    let mut used = HashSet::with_capacity(by_name.len());
    by_name
        .into_iter()
        .map(|(name, (location, job_count))| {
            let mut base = slugify(name);
            if base.is_empty() {
                base = "company".to_string();
            }
            let mut slug = base.clone();
            let mut n = 2;
            while !used.insert(slug.clone()) {
                slug = format!("{base}-{n}");
                n += 1;
            }
            Company {
                name: name.to_string(),
                slug,
                location: location.to_string(),
                job_count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::snapshot::{load_active_jobs, JobSnapshot};

    const SNAPSHOT: &str = r#"[
        {"id": "1", "title": "t", "company": "Yoco", "location": "Cape Town, Western Cape, South Africa",
         "job_type": "full-time", "experience_level": "mid", "is_active": true},
        {"id": "2", "title": "t", "company": "Paystack", "location": "Lagos, Lagos, Nigeria",
         "job_type": "contract", "experience_level": "senior", "is_active": true},
        {"id": "3", "title": "t", "company": "Andela Inc.", "location": "Remote",
         "job_type": "full-time", "experience_level": "junior", "is_active": true},
        {"id": "4", "title": "t", "company": "Paystack", "location": "Abuja, FCT, Nigeria",
         "job_type": "full-time", "experience_level": "mid", "is_active": true},
        {"id": "5", "title": "t", "company": "Andela, Inc", "location": "Remote",
         "job_type": "freelance", "experience_level": "mid", "is_active": true}
    ]"#;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Andela Inc."), "andela-inc");
        assert_eq!(slugify("  --M&M's Foods--  "), "m-m-s-foods");
        assert_eq!(slugify("ABC123"), "abc123");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_infer_country() {
        assert_eq!(infer_country("Lagos, Lagos, Nigeria"), "Nigeria");
        assert_eq!(infer_country("Johannesburg, Gauteng, South Africa"), "South Africa");
        assert_eq!(infer_country("Nairobi, Kenya"), "Global");
        assert_eq!(infer_country("nigeria"), "Global");
    }

    #[test]
    fn test_companies_sorted_with_counts() {
        let snapshot = JobSnapshot::from_json(SNAPSHOT).unwrap();
        let jobs = load_active_jobs(&snapshot);
        let companies = derive_companies(&jobs);

        let names: Vec<_> = companies.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Andela Inc.", "Andela, Inc", "Paystack", "Yoco"]);

        let paystack = companies.iter().find(|c| c.name == "Paystack").unwrap();
        assert_eq!(paystack.job_count, 2);
        assert_eq!(paystack.location, "Nigeria");
    }

    #[test]
    fn test_slug_collisions_get_suffixes() {
        let snapshot = JobSnapshot::from_json(SNAPSHOT).unwrap();
        let companies = derive_companies(snapshot.jobs());
        let slugs: Vec<_> = companies.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["andela-inc", "andela-inc-2", "paystack", "yoco"]);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let first = serde_json::to_string_pretty(&derive_companies(
            JobSnapshot::from_json(SNAPSHOT).unwrap().jobs(),
        ))
        .unwrap();
        let second = serde_json::to_string_pretty(&derive_companies(
            JobSnapshot::from_json(SNAPSHOT).unwrap().jobs(),
        ))
        .unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }
}
