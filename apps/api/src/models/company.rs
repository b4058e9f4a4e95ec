use serde::{Deserialize, Serialize};

/// A company derived from the distinct `company` values of the active jobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    pub name: String,
    pub slug: String,
    pub location: String,
    pub job_count: usize,
}
