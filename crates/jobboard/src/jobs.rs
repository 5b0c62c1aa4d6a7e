//! Job postings as seen by the application lifecycle.
//!
//! Job CRUD and search live elsewhere; this module owns the entity shape, its
//! field-level validation and the read-only [`JobRegistry`] contract.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::identity::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    #[default]
    FullTime,
    PartTime,
    Contract,
    Internship,
    Temporary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    #[default]
    Mid,
    Senior,
    Lead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalaryRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub employer_id: UserId,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: SalaryRange,
    #[serde(default)]
    pub job_type: JobType,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default, deserialize_with = "deserialize_skills")]
    pub skills: BTreeSet<String>,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub views_count: u64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn validate(&self) -> Result<(), JobValidationError> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(JobValidationError::MissingText);
        }
        if let (Some(min), Some(max)) = (self.salary.min, self.salary.max) {
            if min > max {
                return Err(JobValidationError::SalaryRange { min, max });
            }
        }
        Ok(())
    }

    /// Open and not past its expiry at `now`.
    pub fn accepts_applications(&self, now: DateTime<Utc>) -> bool {
        self.status == JobStatus::Open && self.expires_at.map_or(true, |expiry| expiry > now)
    }

    pub fn summary(&self) -> JobSummary {
        JobSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum JobValidationError {
    #[error("title and description are required")]
    MissingText,
    #[error("salary minimum {min} exceeds maximum {max}")]
    SalaryRange { min: u32, max: u32 },
}

/// Normalize a skill list: trim, drop empties, lowercase, dedupe.
pub fn normalize_skills<I, S>(skills: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    skills
        .into_iter()
        .map(|skill| skill.as_ref().trim().to_lowercase())
        .filter(|skill| !skill.is_empty())
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SkillsInput {
    List(Vec<String>),
    Csv(String),
}

fn deserialize_skills<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<SkillsInput>::deserialize(deserializer)? {
        Some(SkillsInput::List(list)) => normalize_skills(list),
        Some(SkillsInput::Csv(raw)) => normalize_skills(raw.split(',')),
        None => BTreeSet::new(),
    })
}

/// Owner and title, the two facts the lifecycle needs for authorization
/// and notification text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOwnership {
    pub employer_id: Option<UserId>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: JobId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Read-only view of the job catalogue consumed by the lifecycle.
pub trait JobRegistry: Send + Sync {
    fn exists(&self, id: &JobId) -> Result<bool, RegistryError>;
    fn owner_and_title(&self, id: &JobId) -> Result<JobOwnership, RegistryError>;
    fn is_open(&self, id: &JobId) -> Result<bool, RegistryError>;
    fn summary(&self, id: &JobId) -> Result<Option<JobSummary>, RegistryError>;
    fn owned_by(&self, employer: &UserId) -> Result<Vec<JobId>, RegistryError>;
}

/// Failure raised by read-only collaborators (job registry, resume store).
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}
