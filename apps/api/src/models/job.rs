use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Freelance,
    Internship,
}

impl JobType {
    /// The snapshot spelling, which is also what filter criteria compare against.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full-time",
            JobType::PartTime => "part-time",
            JobType::Contract => "contract",
            JobType::Freelance => "freelance",
            JobType::Internship => "internship",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    Junior,
    Mid,
    Senior,
    Executive,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Executive => "executive",
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

/// One advertised position as it appears in the job snapshot.
///
/// Records are read-only once loaded. Optional fields the ingestion process
/// did not fill are defaulted here so filtering never sees a missing value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub remote_allowed: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub posted_date: Option<NaiveDate>,
    #[serde(default)]
    pub expires_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source_website: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub application_url: Option<String>,
}

impl Job {
    /// True when both bounds are present and `salary_min > salary_max`.
    /// Such records are kept; the loader only reports them.
    pub fn has_inverted_salary(&self) -> bool {
        matches!((self.salary_min, self.salary_max), (Some(min), Some(max)) if min > max)
    }
}
